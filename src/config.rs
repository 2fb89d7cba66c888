use std::time::Duration;

pub const DEFAULT_CURRENT_URL: &str = "http://api.weatherapi.com/v1/current.json";
pub const DEFAULT_FORECAST_URL: &str = "http://api.weatherapi.com/v1/forecast.json";

/// Tuning knobs for one ingestion run.
///
/// The defaults mirror the free weatherapi.com tier: bursts of 500 requests
/// with a 10 second cooldown stay under its per-minute ceiling, and the
/// admission cap of 2000 sits well above the batch size so the batch pacing,
/// not the semaphore, is the effective rate governor.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestConfig {
    pub api_key: String,
    pub current_url: String,
    pub forecast_url: String,
    /// Per-request timeout, applied to each of the two calls independently.
    pub request_timeout: Duration,
    /// Number of locations dispatched concurrently before a cooldown.
    pub batch_size: usize,
    /// Cooldown between batches; never applied after the final batch.
    pub batch_pause: Duration,
    /// Maximum fetches in flight at once, across batch boundaries.
    pub concurrency_cap: usize,
    /// Small delay before each request to soften the burst front of a batch.
    pub request_jitter: Duration,
    /// Extra passes re-fetching rate-limited locations after the main loop.
    /// Zero (the default) records the failure and moves on.
    pub rate_limit_retries: u32,
    /// Connection-pool cap per destination host, below the admission cap.
    pub max_connections_per_host: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            current_url: DEFAULT_CURRENT_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            request_timeout: Duration::from_secs(15),
            batch_size: 500,
            batch_pause: Duration::from_secs(10),
            concurrency_cap: 2000,
            request_jitter: Duration::from_millis(100),
            rate_limit_retries: 0,
            max_connections_per_host: 10,
        }
    }
}
