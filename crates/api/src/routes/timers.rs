//! Timer Routes

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routes::{bad_request, ApiError};
use crate::SharedState;
use timer_registry::Timer;

/// Request body for starting a timer
#[derive(Debug, Deserialize)]
pub struct StartTimerRequest {
    pub label: String,
    pub seconds: u32,
}

/// Response after starting a timer
#[derive(Debug, Serialize)]
pub struct StartTimerResponse {
    pub id: Uuid,
    pub timers: Vec<Timer>,
}

/// Response for the timer listing
#[derive(Debug, Serialize)]
pub struct TimerListResponse {
    pub timers: Vec<Timer>,
}

/// Start a countdown timer
pub async fn start(
    State(state): State<SharedState>,
    Json(request): Json<StartTimerRequest>,
) -> Result<Json<StartTimerResponse>, ApiError> {
    let mut state = state.write().await;
    let timer = state
        .store
        .start_timer(&request.label, request.seconds)
        .map_err(|e| bad_request(e.to_string()))?;

    Ok(Json(StartTimerResponse {
        id: timer.id,
        timers: state.store.list_timers(),
    }))
}

/// List running timers ascending by expiry, reaping expired ones
pub async fn list(State(state): State<SharedState>) -> Json<TimerListResponse> {
    let timers = state.write().await.store.list_timers();
    Json(TimerListResponse { timers })
}
