use crate::api::client::WeatherClient;
use crate::config::IngestConfig;
use crate::fetch::outcome::FetchOutcome;
use crate::fetch::worker::fetch_entity;
use futures_util::future::join_all;
use log::info;
use tokio::sync::Semaphore;
use tokio::time::sleep;

/// Runs the full entity list in contiguous batches.
///
/// Each batch fans out concurrently under the admission semaphore and drains
/// completely before the next one starts; the pacing pause runs only between
/// batches. `join_all` returns outcomes in input order, so the result lines
/// up with `entities` regardless of completion order within a batch.
pub(crate) async fn run_batches(
    client: &dyn WeatherClient,
    config: &IngestConfig,
    entities: &[String],
) -> Vec<FetchOutcome> {
    let gate = Semaphore::new(config.concurrency_cap.max(1));
    let batch_size = config.batch_size.max(1);
    let total_batches = entities.len().div_ceil(batch_size);

    let mut outcomes = Vec::with_capacity(entities.len());
    for (index, batch) in entities.chunks(batch_size).enumerate() {
        info!(
            "processing batch {}/{} ({} locations)",
            index + 1,
            total_batches,
            batch.len()
        );

        let fetches = batch
            .iter()
            .map(|entity| fetch_entity(client, config, &gate, entity));
        outcomes.extend(join_all(fetches).await);

        if index + 1 < total_batches {
            info!("waiting {:?} between batches", config.batch_pause);
            sleep(config.batch_pause).await;
        }
    }
    outcomes
}
