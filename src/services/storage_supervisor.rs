use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{
        kv_store::KeyValueStore,
        retry::{Backoff, MAX_ATTEMPTS},
        storage::StorageError,
    },
    services::collection_service,
    state::SharedState,
};

const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Connect to the store and keep the shared state in degraded mode while it is unreachable.
///
/// Runs forever; spawn it on the runtime.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn KeyValueStore>, StorageError>> + Send,
{
    let mut backoff = Backoff::default();

    loop {
        match connect().await {
            Ok(store) => {
                state.set_store(store.clone()).await;
                info!("storage connection established; leaving degraded mode");
                backoff.reset();

                if let Err(err) = collection_service::seed_players(&state).await {
                    warn!(error = %err, "failed to seed players collection");
                }

                watch_health(&state, store.as_ref()).await;
                state.clear_store().await;
            }
            Err(err) => {
                warn!(error = %err, retry_in = ?backoff.current(), "storage connection attempt failed");
            }
        }
        backoff.wait().await;
    }
}

/// Poll the store until it fails and cannot be reconnected.
async fn watch_health(state: &SharedState, store: &dyn KeyValueStore) {
    loop {
        match store.health_check().await {
            Ok(()) => {
                if state.is_degraded().await {
                    info!("storage healthy again; leaving degraded mode");
                    state.update_degraded(false).await;
                }
                sleep(HEALTH_POLL_INTERVAL).await;
            }
            Err(err) => {
                warn!(error = %err, "storage health check failed; entering degraded mode");
                state.update_degraded(true).await;

                if reconnect(store).await {
                    state.update_degraded(false).await;
                    sleep(HEALTH_POLL_INTERVAL).await;
                } else {
                    warn!("exhausted storage reconnect attempts; dropping connection");
                    return;
                }
            }
        }
    }
}

async fn reconnect(store: &dyn KeyValueStore) -> bool {
    let mut backoff = Backoff::default();

    for attempt in 1..=MAX_ATTEMPTS {
        match store.try_reconnect().await {
            Ok(()) => {
                info!(attempt, "storage reconnection succeeded");
                return true;
            }
            Err(err) => {
                warn!(attempt, error = %err, "storage reconnect attempt failed");
                backoff.wait().await;
            }
        }
    }

    false
}
