use crate::api::client::{TransportFault, WeatherClient};
use crate::api::payloads::{provider_error, CurrentPayload, ForecastPayload};
use crate::config::IngestConfig;
use crate::fetch::outcome::{ErrorCategory, FetchOutcome, Stage};
use crate::record::{WeatherRecord, FORECAST_DAYS};
use log::warn;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::sleep;

/// Wait the provider suggests after a throttle; recorded on the outcome and
/// honored between retry passes, never inside the same batch.
const RATE_LIMIT_RETRY_AFTER: Duration = Duration::from_secs(5);

/// Fetches one location through the two-stage current→forecast protocol and
/// classifies the result. Always produces exactly one outcome; the admission
/// permit is an RAII guard, so the slot is released on every exit path.
pub(crate) async fn fetch_entity(
    client: &dyn WeatherClient,
    config: &IngestConfig,
    gate: &Semaphore,
    entity: &str,
) -> FetchOutcome {
    let _permit = match gate.acquire().await {
        Ok(permit) => permit,
        // The semaphore lives as long as the run and is never closed.
        Err(_) => {
            return FetchOutcome::failure(
                entity,
                ErrorCategory::TransportError("admission gate closed".to_string()),
            )
        }
    };

    if !config.request_jitter.is_zero() {
        sleep(config.request_jitter).await;
    }

    let response = match client.get_current(entity).await {
        Ok(response) => response,
        Err(fault) => return fault_outcome(entity, fault),
    };
    if response.status == 429 {
        warn!("rate limited for {entity}");
        return FetchOutcome::failure(
            entity,
            ErrorCategory::RateLimited {
                retry_after: RATE_LIMIT_RETRY_AFTER,
            },
        );
    }
    if response.status != 200 {
        return FetchOutcome::failure(
            entity,
            ErrorCategory::HttpStatus {
                stage: Stage::Current,
                code: response.status,
            },
        );
    }
    if let Some(message) = provider_error(&response.body) {
        warn!("api error for {entity}: {message}");
        return FetchOutcome::failure(entity, ErrorCategory::ProviderError(message));
    }
    let current: CurrentPayload = match serde_json::from_value(response.body) {
        Ok(payload) => payload,
        Err(error) => {
            return FetchOutcome::failure(
                entity,
                ErrorCategory::TransportError(format!("malformed current payload: {error}")),
            )
        }
    };

    let response = match client.get_forecast(entity, FORECAST_DAYS as u8).await {
        Ok(response) => response,
        Err(fault) => return fault_outcome(entity, fault),
    };
    if response.status != 200 {
        return FetchOutcome::failure(
            entity,
            ErrorCategory::HttpStatus {
                stage: Stage::Forecast,
                code: response.status,
            },
        );
    }
    if let Some(message) = provider_error(&response.body) {
        warn!("api error for {entity}: {message}");
        return FetchOutcome::failure(entity, ErrorCategory::ProviderError(message));
    }
    let forecast: ForecastPayload = match serde_json::from_value(response.body) {
        Ok(payload) => payload,
        Err(error) => {
            return FetchOutcome::failure(
                entity,
                ErrorCategory::TransportError(format!("malformed forecast payload: {error}")),
            )
        }
    };

    FetchOutcome::Success(WeatherRecord::from_payloads(entity, current, forecast))
}

fn fault_outcome(entity: &str, fault: TransportFault) -> FetchOutcome {
    match &fault {
        TransportFault::Timeout => warn!("timeout for {entity}"),
        TransportFault::Transport(message) => warn!("transport error for {entity}: {message}"),
    }
    FetchOutcome::failure(entity, fault.into())
}
