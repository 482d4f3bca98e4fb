// Main entry point - Dependency injection and command dispatch
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::application::session::SessionService;
use crate::domain::view_state::Period;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_sensor_api::HttpSensorApi;
use crate::infrastructure::token_store::FileTokenStore;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{self, DashboardRequest, SortArg};
use crate::presentation::route_guard::RouteGuard;

#[derive(Parser, Debug)]
#[command(name = "station-dashboard", version, about = "Sensor station averages and time series")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Dashboard path to open
    #[arg(long, default_value = "/sensors")]
    path: String,

    /// Time window: 24h, 48h, 1w or 1m
    #[arg(long)]
    period: Option<Period>,

    /// Click a column header; repeat to toggle direction
    #[arg(long, value_enum)]
    sort: Vec<SortArg>,

    #[arg(long)]
    page: Option<usize>,

    /// Show the time series of this station
    #[arg(long)]
    station: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_dashboard_config()?;
    tracing::debug!("Using sensor API at {}", config.api.base_url);

    // Wire adapters into the application layer
    let api = Arc::new(HttpSensorApi::new(&config.api.base_url, config.api.timeout())?);
    let session = Arc::new(FileTokenStore::new(&config.session.token_file));
    let state = AppState {
        api: api.clone(),
        session: session.clone(),
        session_service: SessionService::new(api, session),
        guard: RouteGuard::new(config.routes.login_path),
    };

    match cli.command {
        Some(Command::Login { username, password }) => {
            handlers::login(&state, &username, &password).await
        }
        Some(Command::Logout) => {
            handlers::logout(&state);
            Ok(())
        }
        None => {
            let request = DashboardRequest {
                path: cli.path,
                period: cli.period,
                sort: cli.sort,
                page: cli.page,
                station: cli.station,
            };
            handlers::show_dashboard(&state, request).await
        }
    }
}
