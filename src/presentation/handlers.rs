// Command handlers for the terminal front end
use crate::application::stations_view_model::StationsViewModel;
use crate::domain::view_state::{Period, SortColumn};
use crate::presentation::app_state::AppState;
use crate::presentation::dashboard_view::DashboardView;
use crate::presentation::route_guard::{Access, RouteGuard};
use anyhow::Context;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Station,
    Average,
}

impl From<SortArg> for SortColumn {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Station => SortColumn::EquipmentId,
            SortArg::Average => SortColumn::Average,
        }
    }
}

/// What the user asked the dashboard page to show
#[derive(Debug, Clone, Default)]
pub struct DashboardRequest {
    pub path: String,
    pub period: Option<Period>,
    pub sort: Vec<SortArg>,
    pub page: Option<usize>,
    pub station: Option<String>,
}

pub async fn login(state: &AppState, username: &str, password: &str) -> anyhow::Result<()> {
    state
        .session_service
        .login(username, password)
        .await
        .context("Login failed")?;
    println!("Signed in as {}", username);
    Ok(())
}

pub fn logout(state: &AppState) {
    state.session_service.logout();
    println!("Signed out");
}

pub async fn show_dashboard(state: &AppState, request: DashboardRequest) -> anyhow::Result<()> {
    print!("{}", render_dashboard(state, request).await?);
    Ok(())
}

/// Runs the page the way a visit would: guard, session check, load, then the
/// user's clicks. Unauthenticated visits are errors so the exit code shows it.
pub async fn render_dashboard(state: &AppState, request: DashboardRequest) -> anyhow::Result<String> {
    if let Access::Redirect(to) = state.guard.check(&request.path, state.session.as_ref()) {
        anyhow::bail!("Not signed in, redirecting to {}", to);
    }

    if !RouteGuard::is_protected(&request.path) {
        return Ok(
            "Welcome to the Sensor Data Dashboard. Open /sensors to see the stations.\n"
                .to_string(),
        );
    }

    let user = match state.session_service.current_user().await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Session rejected: {}", e);
            anyhow::bail!(
                "Session expired ({}), redirecting to {}",
                e,
                state.guard.login_path()
            );
        }
    };

    let mut view_model = StationsViewModel::new(state.api.clone(), state.session.clone());
    match request.period {
        Some(period) => view_model.set_period(period).await,
        None => view_model.refresh().await,
    }
    tracing::debug!("{} stations in view", view_model.stations().len());

    for column in request.sort {
        view_model.set_sort(column.into());
    }
    if let Some(page) = request.page {
        view_model.set_page(page);
    }

    // A later fetch would clear the averages error before it is shown
    if let Some(station) = &request.station {
        if view_model.error().is_none() {
            view_model.select_station(station).await;
        } else {
            tracing::warn!("Skipping station {} after failed averages load", station);
        }
    }

    Ok(DashboardView::new(&view_model, &user).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sensor_api::fake::FakeSensorApi;
    use crate::application::sensor_api::ApiError;
    use crate::application::session::fake::FakeAuthApi;
    use crate::application::session::{SessionProvider, SessionService};
    use crate::domain::station::{StationAverage, StationSeries};
    use crate::domain::user::User;
    use crate::infrastructure::token_store::MemoryTokenStore;
    use std::sync::Arc;

    fn state(api: Arc<FakeSensorApi>, token: Option<&str>, user: Result<User, ApiError>) -> AppState {
        let session = Arc::new(match token {
            Some(token) => MemoryTokenStore::with_token(token),
            None => MemoryTokenStore::default(),
        });
        AppState {
            api,
            session: session.clone(),
            session_service: SessionService::new(Arc::new(FakeAuthApi::new(user)), session),
            guard: RouteGuard::new("/login"),
        }
    }

    fn ana() -> Result<User, ApiError> {
        Ok(User {
            username: "ana".to_string(),
        })
    }

    fn request(station: Option<&str>) -> DashboardRequest {
        DashboardRequest {
            path: "/sensors".to_string(),
            station: station.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_averages_error_survives_station_request() {
        let api = Arc::new(FakeSensorApi::default());
        api.push_averages(Err(ApiError::Status {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        }));
        api.push_series(Ok(StationSeries {
            equipment_id: "EQ-1".to_string(),
            values: Vec::new(),
        }));
        let state = state(api.clone(), Some("t"), ana());

        let text = render_dashboard(&state, request(Some("EQ-1"))).await.unwrap();

        assert!(text.contains("Error: Failed to fetch data: Internal Server Error"));
        assert_eq!(api.calls(), vec!["averages t 24h".to_string()]);
    }

    #[tokio::test]
    async fn test_station_request_after_successful_load() {
        let api = Arc::new(FakeSensorApi::default());
        api.push_averages(Ok(vec![StationAverage::new("EQ-1", Some(3.0))]));
        api.push_series(Ok(StationSeries {
            equipment_id: "EQ-1".to_string(),
            values: Vec::new(),
        }));
        let state = state(api.clone(), Some("t"), ana());

        let text = render_dashboard(&state, request(Some("EQ-1"))).await.unwrap();

        assert!(text.contains("Station data (EQ-1)"));
        assert!(!text.contains("Error:"));
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_token_is_an_error() {
        let api = Arc::new(FakeSensorApi::default());
        let state = state(api.clone(), None, ana());

        let err = render_dashboard(&state, request(None)).await.unwrap_err();

        assert!(err.to_string().contains("redirecting to /login"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_session_is_an_error() {
        let api = Arc::new(FakeSensorApi::default());
        let rejected = Err(ApiError::Status {
            status: 401,
            status_text: "Unauthorized".to_string(),
        });
        let state = state(api.clone(), Some("stale"), rejected);

        assert!(render_dashboard(&state, request(None)).await.is_err());
        assert_eq!(state.session.get_token(), None);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unprotected_path_shows_welcome() {
        let state = state(Arc::new(FakeSensorApi::default()), None, ana());
        let mut home = request(None);
        home.path = "/".to_string();

        let text = render_dashboard(&state, home).await.unwrap();

        assert!(text.starts_with("Welcome"));
    }

    #[test]
    fn test_sort_arg_mapping() {
        assert_eq!(SortColumn::from(SortArg::Station), SortColumn::EquipmentId);
        assert_eq!(SortColumn::from(SortArg::Average), SortColumn::Average);
    }
}
