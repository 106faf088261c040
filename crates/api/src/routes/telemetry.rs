//! Telemetry Routes

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::routes::{internal_error, ApiError};
use crate::SharedState;
use alert_engine::ActiveAlert;
use telemetry_sim::{StepMode, TelemetrySnapshot};

/// Query parameters for the telemetry endpoint
#[derive(Debug, Deserialize)]
pub struct TelemetryQuery {
    /// `demo` requests the scripted degradation trend
    pub mode: Option<String>,
}

/// Response for the telemetry endpoint
#[derive(Debug, Serialize)]
pub struct TelemetryResponse {
    pub telemetry: TelemetrySnapshot,
    pub alerts: Vec<ActiveAlert>,
}

/// Step the simulator once and classify the fresh snapshot
pub async fn get_telemetry(
    State(state): State<SharedState>,
    Query(params): Query<TelemetryQuery>,
) -> Result<Json<TelemetryResponse>, ApiError> {
    let mode = if params.mode.as_deref() == Some("demo") {
        StepMode::DemoTrend
    } else {
        StepMode::Nominal
    };

    let mut state = state.write().await;
    let (telemetry, alerts) = state
        .store
        .sample(mode)
        .map_err(|e| internal_error(e.to_string()))?;

    Ok(Json(TelemetryResponse { telemetry, alerts }))
}
