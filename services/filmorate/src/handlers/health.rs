use axum::{extract::State, http::StatusCode};
use tracing::warn;

use crate::state::AppState;

/// Handler for `GET /healthz`, liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`. Ready once the store answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.store.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            warn!(error = ?e, backend = state.store.backend(), "store not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
