//! Health check payload.

use serde::Serialize;
use utoipa::ToSchema;

/// Connectivity of the storage backend as seen by the `/healthcheck` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// A store is installed and answering.
    Ok,
    /// No usable store; data routes answer 503.
    Degraded,
}

/// Body of the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status.
    pub status: HealthStatus,
}

impl From<bool> for HealthResponse {
    fn from(degraded: bool) -> Self {
        let status = if degraded {
            HealthStatus::Degraded
        } else {
            HealthStatus::Ok
        };
        Self { status }
    }
}
