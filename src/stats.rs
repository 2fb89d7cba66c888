use crate::fetch::outcome::FetchOutcome;
use log::info;
use std::collections::BTreeMap;

/// End-of-run diagnostics: per-category error counts plus the success and
/// failure id lists, in entity-list order.
///
/// Built by a single fold over the completed outcome sequence rather than by
/// concurrent mutation during the run, so the aggregation is a pure function
/// of its input and arrival order cannot affect the counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub error_counts: BTreeMap<String, u64>,
    pub successes: Vec<String>,
    pub failures: Vec<String>,
}

impl RunStats {
    pub fn from_outcomes(outcomes: &[FetchOutcome]) -> Self {
        let mut stats = Self::default();
        for outcome in outcomes {
            match outcome {
                FetchOutcome::Success(record) => stats.successes.push(record.city.clone()),
                FetchOutcome::Failure {
                    entity, category, ..
                } => {
                    *stats.error_counts.entry(category.key()).or_insert(0) += 1;
                    stats.failures.push(entity.clone());
                }
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn log_summary(&self) {
        info!(
            "run complete: {} successful, {} failed out of {} locations",
            self.successes.len(),
            self.failures.len(),
            self.total()
        );
        if !self.error_counts.is_empty() {
            info!("error summary:");
            for (category, count) in &self.error_counts {
                info!("  {category}: {count}");
            }
        }
    }
}
