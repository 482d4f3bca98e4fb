// Presentation layer - Terminal front end
pub mod app_state;
pub mod dashboard_view;
pub mod handlers;
pub mod route_guard;
