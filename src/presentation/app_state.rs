// Application state shared by the command handlers
use crate::application::sensor_api::SensorDataApi;
use crate::application::session::{SessionProvider, SessionService};
use crate::presentation::route_guard::RouteGuard;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn SensorDataApi>,
    pub session: Arc<dyn SessionProvider>,
    pub session_service: SessionService,
    pub guard: RouteGuard,
}
