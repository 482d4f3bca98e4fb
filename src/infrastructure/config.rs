use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TOKEN_FILE: &str = ".dashboard-token";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    pub session: SessionSettings,
    pub routes: RouteSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// Unset means the transport default (no request timeout)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ApiSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub token_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RouteSettings {
    pub login_path: String,
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_config_from("config/dashboard")
}

/// Defaults, then the optional file, then `DASHBOARD__SECTION__KEY` variables
pub fn load_config_from(name: &str) -> anyhow::Result<DashboardConfig> {
    build_config(name, None)
}

/// `env` replaces the process environment when given
fn build_config(
    name: &str,
    env: Option<config::Map<String, String>>,
) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .set_default("api.base_url", DEFAULT_API_URL)?
        .set_default("session.token_file", DEFAULT_TOKEN_FILE)?
        .set_default("routes.login_path", DEFAULT_LOGIN_PATH)?
        .add_source(config::File::with_name(name).required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .source(env),
        )
        .build()
        .with_context(|| format!("Failed to load configuration from {}", name))?;

    Ok(settings.try_deserialize()?)
}
