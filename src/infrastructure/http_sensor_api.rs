// HTTP implementation of the sensor data and auth APIs
use crate::application::sensor_api::{ApiError, SensorDataApi};
use crate::application::session::AuthApi;
use crate::domain::station::{StationAverage, StationSeries};
use crate::domain::user::{AccessToken, User};
use crate::domain::view_state::Period;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpSensorApi {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

impl HttpSensorApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().context("Failed to build HTTP client")?,
        })
    }

    fn averages_url(&self, period: Period) -> String {
        format!("{}/sensors/averages?period={}", self.base_url, period)
    }

    fn series_url(&self, equipment_id: &str, period: Period) -> String {
        format!(
            "{}/sensors/{}/data?period={}",
            self.base_url,
            urlencoding::encode(equipment_id),
            period
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, token: &str) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    /// Non-2xx becomes `Status`; a body that does not match `T` becomes `Malformed`
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} responded with {}", response.url(), status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl SensorDataApi for HttpSensorApi {
    async fn fetch_averages(
        &self,
        token: &str,
        period: Period,
    ) -> Result<Vec<StationAverage>, ApiError> {
        self.get_json(&self.averages_url(period), token).await
    }

    async fn fetch_station_series(
        &self,
        token: &str,
        equipment_id: &str,
        period: Period,
    ) -> Result<StationSeries, ApiError> {
        self.get_json(&self.series_url(equipment_id, period), token)
            .await
    }
}

#[async_trait]
impl AuthApi for HttpSensorApi {
    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        self.get_json(&format!("{}/auth/me", self.base_url), token)
            .await
    }

    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::decode(response).await
    }
}
