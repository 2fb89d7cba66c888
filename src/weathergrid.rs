//! Main entry point: one call runs the full fetch-and-aggregate pipeline
//! over a location list and returns the compiled snapshot plus run
//! diagnostics. An external scheduler owns the cadence (for example every
//! 15 minutes) and any invocation-level retry policy.

use crate::api::client::{HttpWeatherClient, WeatherClient};
use crate::config::IngestConfig;
use crate::dataset::compile_dataset;
use crate::error::WeatherGridError;
use crate::fetch::outcome::{ErrorCategory, FetchOutcome};
use crate::fetch::scheduler::run_batches;
use crate::stats::RunStats;
use bon::bon;
use log::info;
use polars::prelude::DataFrame;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// What one ingestion run hands back: the rectangular snapshot for the sink
/// and the diagnostic summary for observability.
#[derive(Debug, Clone)]
pub struct IngestionReport {
    pub dataset: DataFrame,
    pub stats: RunStats,
}

/// Concurrent weather snapshot client.
///
/// Fetches current conditions and a 3-day forecast for every location in a
/// list, in paced batches under an admission cap, and compiles the successes
/// into a fixed-schema Polars `DataFrame`. Individual locations can fail
/// without affecting the rest of the run; failures are classified and
/// reported in [`RunStats`].
///
/// # Examples
///
/// ```rust,no_run
/// # use weathergrid::{WeatherGrid, WeatherGridError};
/// # async fn run() -> Result<(), WeatherGridError> {
/// let grid = WeatherGrid::builder()
///     .api_key("your-weatherapi-key".to_string())
///     .build()?;
///
/// let cities = vec!["Paris".to_string(), "Berlin".to_string()];
/// let report = grid.run(&cities).await?;
/// println!("{}", report.dataset);
/// println!("{} failed", report.stats.failures.len());
/// # Ok(())
/// # }
/// ```
pub struct WeatherGrid {
    client: Arc<dyn WeatherClient>,
    config: IngestConfig,
}

#[bon]
impl WeatherGrid {
    /// Builds a client against the real weatherapi.com endpoints.
    ///
    /// Every option except `api_key` has a default; see [`IngestConfig`] for
    /// the values and their rationale.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherGridError::ClientBuild`] when the underlying HTTP
    /// client cannot be constructed. This is the only way a run can fail
    /// before any batch is scheduled.
    #[builder]
    pub fn new(
        api_key: String,
        current_url: Option<String>,
        forecast_url: Option<String>,
        request_timeout: Option<Duration>,
        batch_size: Option<usize>,
        batch_pause: Option<Duration>,
        concurrency_cap: Option<usize>,
        request_jitter: Option<Duration>,
        rate_limit_retries: Option<u32>,
        max_connections_per_host: Option<usize>,
    ) -> Result<Self, WeatherGridError> {
        let defaults = IngestConfig::default();
        let config = IngestConfig {
            api_key,
            current_url: current_url.unwrap_or(defaults.current_url),
            forecast_url: forecast_url.unwrap_or(defaults.forecast_url),
            request_timeout: request_timeout.unwrap_or(defaults.request_timeout),
            batch_size: batch_size.unwrap_or(defaults.batch_size),
            batch_pause: batch_pause.unwrap_or(defaults.batch_pause),
            concurrency_cap: concurrency_cap.unwrap_or(defaults.concurrency_cap),
            request_jitter: request_jitter.unwrap_or(defaults.request_jitter),
            rate_limit_retries: rate_limit_retries.unwrap_or(defaults.rate_limit_retries),
            max_connections_per_host: max_connections_per_host
                .unwrap_or(defaults.max_connections_per_host),
        };
        let client = HttpWeatherClient::new(&config)?;
        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }
}

impl WeatherGrid {
    /// Builds a client over any [`WeatherClient`] implementation. Used for
    /// deterministic fakes in tests and for alternate transports.
    pub fn with_client(client: Arc<dyn WeatherClient>, config: IngestConfig) -> Self {
        Self { client, config }
    }

    /// Runs the full ingestion over `entities` and returns the compiled
    /// dataset plus the run summary.
    ///
    /// Every entity produces exactly one outcome. An empty entity list, or a
    /// run where every entity fails, returns an empty dataset with the full
    /// schema; neither is an error.
    pub async fn run(&self, entities: &[String]) -> Result<IngestionReport, WeatherGridError> {
        info!("starting ingestion run over {} locations", entities.len());

        let mut outcomes = run_batches(self.client.as_ref(), &self.config, entities).await;
        self.retry_rate_limited(&mut outcomes).await;

        let stats = RunStats::from_outcomes(&outcomes);
        stats.log_summary();

        let dataset = compile_dataset(&outcomes)?;
        Ok(IngestionReport { dataset, stats })
    }

    /// Optional bounded retry for throttled locations. Each pass re-fetches
    /// only entities whose outcome is a retryable rate-limit failure and
    /// replaces their outcome in place, keeping one outcome per entity.
    async fn retry_rate_limited(&self, outcomes: &mut [FetchOutcome]) {
        for pass in 0..self.config.rate_limit_retries {
            let pending: Vec<String> = outcomes
                .iter()
                .filter(|outcome| {
                    matches!(
                        outcome,
                        FetchOutcome::Failure {
                            category: ErrorCategory::RateLimited { .. },
                            retryable: true,
                            ..
                        }
                    )
                })
                .map(|outcome| outcome.entity().to_string())
                .collect();
            if pending.is_empty() {
                return;
            }

            let wait = outcomes
                .iter()
                .filter_map(|outcome| match outcome {
                    FetchOutcome::Failure {
                        category: ErrorCategory::RateLimited { retry_after },
                        ..
                    } => Some(*retry_after),
                    _ => None,
                })
                .max()
                .unwrap_or(self.config.batch_pause);
            info!(
                "retry pass {}: re-fetching {} rate-limited locations after {:?}",
                pass + 1,
                pending.len(),
                wait
            );
            sleep(wait).await;

            let slots: HashMap<String, usize> = outcomes
                .iter()
                .enumerate()
                .map(|(index, outcome)| (outcome.entity().to_string(), index))
                .collect();
            for outcome in run_batches(self.client.as_ref(), &self.config, &pending).await {
                if let Some(&index) = slots.get(outcome.entity()) {
                    outcomes[index] = outcome;
                }
            }
        }
    }
}
