//! Alert Routes

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::routes::{bad_request, ApiError};
use crate::SharedState;
use alert_engine::AlertKind;

/// Request body for acknowledging an alert
#[derive(Debug, Deserialize)]
pub struct AckRequest {
    /// Wire name of the alert kind, e.g. `O2_LOW`
    pub id: String,
}

/// Response after acknowledging an alert
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub ok: bool,
    pub id: AlertKind,
}

/// Acknowledge an alert kind. Idempotent; rejects ids outside the closed
/// enumeration with 400.
pub async fn acknowledge(
    State(state): State<SharedState>,
    Json(request): Json<AckRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    let kind: AlertKind = request
        .id
        .parse()
        .map_err(|e| bad_request(format!("{e}")))?;

    state.write().await.store.acknowledge(kind);

    Ok(Json(AckResponse { ok: true, id: kind }))
}
