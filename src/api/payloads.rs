//! Wire shapes for the two weatherapi.com endpoints.
//!
//! Unknown fields are ignored on purpose; the provider adds fields without
//! notice and only the subset below feeds the snapshot schema.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentPayload {
    pub location: Location,
    pub current: Current,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub country: String,
    pub tz_id: String,
    pub localtime: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Current {
    pub last_updated: String,
    pub temp_c: f64,
    pub condition: Condition,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub cloud: i64,
    pub humidity: i64,
    pub pressure_mb: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Scheme-relative URL, e.g. `//cdn.weatherapi.com/...`.
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    pub forecast: Forecast,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDay {
    pub day: ForecastDaySummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDaySummary {
    pub avgtemp_c: f64,
    pub condition: ForecastCondition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastCondition {
    pub text: String,
}

/// Semantic error envelope the provider returns with a 200 status,
/// e.g. `{"error":{"message":"No matching location found."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorPayload {
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Extracts the provider's own error message from a response body, if the
/// body carries the error envelope.
pub fn provider_error(body: &serde_json::Value) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_value(body.clone()).ok()?;
    Some(payload.error?.message)
}
