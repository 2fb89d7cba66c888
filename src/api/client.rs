use crate::config::IngestConfig;
use crate::error::WeatherGridError;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// A raw endpoint response: HTTP status plus the decoded JSON body.
///
/// Classification (rate limit vs provider error vs usable payload) happens in
/// the fetch worker, not here; the facade only moves bytes.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// `Value::Null` when the body was empty or not JSON, which happens on
    /// throttle and gateway error responses.
    pub body: Value,
}

/// Transport-level faults, i.e. the request never produced an HTTP response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportFault {
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for TransportFault {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// The two-endpoint surface of the upstream weather API.
///
/// The production implementation is [`HttpWeatherClient`]; tests inject a
/// deterministic fake through [`crate::WeatherGrid::with_client`].
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// `GET current.json` for one location.
    async fn get_current(&self, location: &str) -> Result<ApiResponse, TransportFault>;

    /// `GET forecast.json` for one location with the given day horizon.
    async fn get_forecast(&self, location: &str, days: u8)
        -> Result<ApiResponse, TransportFault>;
}

/// `reqwest`-backed [`WeatherClient`] with a bounded per-request timeout and
/// a capped per-host connection pool. The pool cap protects the transport
/// layer; the run-level admission semaphore bounds logical concurrency.
pub struct HttpWeatherClient {
    http: reqwest::Client,
    api_key: String,
    current_url: String,
    forecast_url: String,
}

impl HttpWeatherClient {
    pub fn new(config: &IngestConfig) -> Result<Self, WeatherGridError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(config.max_connections_per_host)
            .build()
            .map_err(WeatherGridError::ClientBuild)?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            current_url: config.current_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }

    async fn get_json(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<ApiResponse, TransportFault> {
        let response = self.http.get(url).query(params).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl WeatherClient for HttpWeatherClient {
    async fn get_current(&self, location: &str) -> Result<ApiResponse, TransportFault> {
        self.get_json(
            &self.current_url,
            &[
                ("key", self.api_key.as_str()),
                ("q", location),
                ("aqi", "no"),
            ],
        )
        .await
    }

    async fn get_forecast(
        &self,
        location: &str,
        days: u8,
    ) -> Result<ApiResponse, TransportFault> {
        let days = days.to_string();
        self.get_json(
            &self.forecast_url,
            &[
                ("key", self.api_key.as_str()),
                ("q", location),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ],
        )
        .await
    }
}
