use crate::api::payloads::{CurrentPayload, ForecastPayload};
use chrono::{DateTime, Utc};

/// Fixed forecast horizon. Every record carries exactly this many day slots
/// so the compiled dataset keeps a stable column set across runs.
pub const FORECAST_DAYS: usize = 3;

/// One location's normalized snapshot: current observation plus a fixed
/// 3-day forecast. Day slots beyond what the provider returned stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub city: String,
    pub country: String,
    pub timezone: String,
    pub localtime: String,
    pub last_updated: String,
    pub temp_c: f64,
    pub condition: String,
    pub condition_icon: String,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub cloud: i64,
    pub humidity: i64,
    pub pressure_mb: f64,
    pub day_temps: [Option<f64>; FORECAST_DAYS],
    pub day_conditions: [Option<String>; FORECAST_DAYS],
    /// Wall-clock capture time; excluded from regression comparisons.
    pub retrieved_at: DateTime<Utc>,
}

impl WeatherRecord {
    pub(crate) fn from_payloads(
        city: &str,
        current: CurrentPayload,
        forecast: ForecastPayload,
    ) -> Self {
        let mut day_temps = [None; FORECAST_DAYS];
        let mut day_conditions: [Option<String>; FORECAST_DAYS] = Default::default();
        for (slot, day) in forecast
            .forecast
            .forecastday
            .into_iter()
            .take(FORECAST_DAYS)
            .enumerate()
        {
            day_temps[slot] = Some(day.day.avgtemp_c);
            day_conditions[slot] = Some(day.day.condition.text);
        }

        Self {
            city: city.to_string(),
            country: current.location.country,
            timezone: current.location.tz_id,
            localtime: current.location.localtime,
            last_updated: current.current.last_updated,
            temp_c: current.current.temp_c,
            condition: current.current.condition.text,
            // The provider hands out scheme-relative icon URLs.
            condition_icon: format!("https:{}", current.current.condition.icon),
            wind_kph: current.current.wind_kph,
            wind_dir: current.current.wind_dir,
            cloud: current.current.cloud,
            humidity: current.current.humidity,
            pressure_mb: current.current.pressure_mb,
            day_temps,
            day_conditions,
            retrieved_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn current_payload() -> CurrentPayload {
        serde_json::from_value(json!({
            "location": {"country": "Germany", "tz_id": "Europe/Berlin", "localtime": "2025-03-01 15:00"},
            "current": {
                "last_updated": "2025-03-01 14:45",
                "temp_c": 7.0,
                "condition": {"text": "Overcast", "icon": "//cdn.weatherapi.com/day/122.png"},
                "wind_kph": 20.2,
                "wind_dir": "W",
                "cloud": 100,
                "humidity": 82,
                "pressure_mb": 1009.0
            }
        }))
        .unwrap()
    }

    fn forecast_payload(days: usize) -> ForecastPayload {
        let entries: Vec<_> = (0..days)
            .map(|i| {
                json!({"day": {"avgtemp_c": 6.0 + i as f64, "condition": {"text": "Cloudy"}}})
            })
            .collect();
        serde_json::from_value(json!({"forecast": {"forecastday": entries}})).unwrap()
    }

    #[test]
    fn maps_full_forecast_into_all_slots() {
        let record = WeatherRecord::from_payloads("Berlin", current_payload(), forecast_payload(3));
        assert_eq!(record.city, "Berlin");
        assert_eq!(record.timezone, "Europe/Berlin");
        assert_eq!(
            record.condition_icon,
            "https://cdn.weatherapi.com/day/122.png"
        );
        assert_eq!(record.day_temps, [Some(6.0), Some(7.0), Some(8.0)]);
        assert!(record.day_conditions.iter().all(|c| c.is_some()));
    }

    #[test]
    fn short_forecast_leaves_trailing_slots_empty() {
        let record = WeatherRecord::from_payloads("Berlin", current_payload(), forecast_payload(1));
        assert_eq!(record.day_temps, [Some(6.0), None, None]);
        assert_eq!(record.day_conditions[0].as_deref(), Some("Cloudy"));
        assert_eq!(record.day_conditions[1], None);
        assert_eq!(record.day_conditions[2], None);
    }

    #[test]
    fn overlong_forecast_is_truncated_to_the_horizon() {
        let record = WeatherRecord::from_payloads("Berlin", current_payload(), forecast_payload(5));
        assert_eq!(record.day_temps, [Some(6.0), Some(7.0), Some(8.0)]);
    }
}
