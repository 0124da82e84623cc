use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Ping the installed store and report whether the backend can serve data.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let Some(store) = state.club_store().await else {
        warn!("storage unavailable (degraded mode)");
        return HealthResponse::degraded();
    };

    if let Err(err) = store.health_check().await {
        warn!(error = %err, "storage health check failed");
        return HealthResponse::degraded();
    }

    if state.is_degraded().await {
        HealthResponse::degraded()
    } else {
        HealthResponse::ok()
    }
}
