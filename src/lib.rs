mod api;
mod config;
mod dataset;
mod error;
mod fetch;
mod record;
mod stats;
mod weathergrid;

pub use error::WeatherGridError;
pub use weathergrid::*;

pub use api::client::{ApiResponse, HttpWeatherClient, TransportFault, WeatherClient};
pub use api::payloads::*;
pub use config::IngestConfig;
pub use dataset::{compile_dataset, DATASET_COLUMNS};
pub use fetch::outcome::{ErrorCategory, FetchOutcome, Stage};
pub use record::{WeatherRecord, FORECAST_DAYS};
pub use stats::RunStats;
