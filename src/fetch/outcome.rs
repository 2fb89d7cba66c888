use crate::api::client::TransportFault;
use crate::record::WeatherRecord;
use std::time::Duration;

/// Which of the two dependent calls a status-level failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Current,
    Forecast,
}

/// Classified failure reasons, entity-scoped and never fatal to the run.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCategory {
    /// Provider-side throttle (HTTP 429 on the current-conditions call).
    /// The hint is informational; re-attempts only happen when the run is
    /// configured with retry passes.
    RateLimited { retry_after: Duration },
    /// Non-success HTTP status other than a throttle.
    HttpStatus { stage: Stage, code: u16 },
    /// API-level semantic error, e.g. "No matching location found."
    ProviderError(String),
    Timeout,
    /// Network fault or a payload that did not match the documented shape;
    /// the raw message is preserved for diagnostics.
    TransportError(String),
}

impl ErrorCategory {
    /// Free-text tally key used by [`crate::RunStats`].
    pub fn key(&self) -> String {
        match self {
            Self::RateLimited { .. } => "rate_limited".to_string(),
            Self::HttpStatus {
                stage: Stage::Current,
                code,
            } => format!("HTTP {code}"),
            Self::HttpStatus {
                stage: Stage::Forecast,
                code,
            } => format!("forecast HTTP {code}"),
            Self::ProviderError(message) => message.clone(),
            Self::Timeout => "timeout".to_string(),
            Self::TransportError(message) => message.clone(),
        }
    }
}

impl From<TransportFault> for ErrorCategory {
    fn from(fault: TransportFault) -> Self {
        match fault {
            TransportFault::Timeout => Self::Timeout,
            TransportFault::Transport(message) => Self::TransportError(message),
        }
    }
}

/// The single result every location produces, exactly once per run.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(WeatherRecord),
    Failure {
        entity: String,
        category: ErrorCategory,
        retryable: bool,
    },
}

impl FetchOutcome {
    pub(crate) fn failure(entity: &str, category: ErrorCategory) -> Self {
        let retryable = matches!(category, ErrorCategory::RateLimited { .. });
        Self::Failure {
            entity: entity.to_string(),
            category,
            retryable,
        }
    }

    pub fn entity(&self) -> &str {
        match self {
            Self::Success(record) => &record.city,
            Self::Failure { entity, .. } => entity,
        }
    }

    pub fn record(&self) -> Option<&WeatherRecord> {
        match self {
            Self::Success(record) => Some(record),
            Self::Failure { .. } => None,
        }
    }
}
