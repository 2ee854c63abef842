use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Ping the installed store and report whether the service is degraded.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.store().await {
        Some(store) => {
            if let Err(err) = store.health_check().await {
                warn!(error = %err, "storage health check failed");
            }
        }
        None => warn!("storage unavailable (degraded mode)"),
    }

    state.is_degraded().await.into()
}
