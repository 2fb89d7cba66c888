use polars::error::PolarsError;
use thiserror::Error;

/// Fatal errors for a whole ingestion run.
///
/// Per-location problems (rate limiting, unknown locations, timeouts) are
/// never surfaced here; they become [`crate::FetchOutcome::Failure`] values
/// and are tallied in [`crate::RunStats`]. A run only fails outright when it
/// could not start at all or when the final dataset cannot be assembled.
#[derive(Debug, Error)]
pub enum WeatherGridError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Failed to assemble snapshot dataset")]
    DatasetBuild(#[from] PolarsError),
}
