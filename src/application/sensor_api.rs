// Sensor data API trait - the backend the view-model fetches from
use crate::domain::station::{StationAverage, StationSeries};
use crate::domain::view_state::Period;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No session token; the request was never sent
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Failed to fetch data: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("{0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait SensorDataApi: Send + Sync {
    /// Average of every known station over `period`
    async fn fetch_averages(
        &self,
        token: &str,
        period: Period,
    ) -> Result<Vec<StationAverage>, ApiError>;

    /// Samples of a single station over `period`, in API order
    async fn fetch_station_series(
        &self,
        token: &str,
        equipment_id: &str,
        period: Period,
    ) -> Result<StationSeries, ApiError>;
}
