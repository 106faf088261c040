//! Restart Route

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::SharedState;

/// Response after a restart
#[derive(Debug, Serialize)]
pub struct RestartResponse {
    pub ok: bool,
}

/// Reset the whole demo store: telemetry back to its seed, debounce
/// counters zeroed, acknowledgements cleared, timers emptied.
pub async fn restart(State(state): State<SharedState>) -> Json<RestartResponse> {
    state.write().await.store.reset();
    Json(RestartResponse { ok: true })
}
