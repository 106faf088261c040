//! Tool Dispatch Route
//!
//! Accepts the same `{ "name": …, "arguments": … }` payloads the assistant
//! loop produces and runs them against the mission store.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::routes::{assistant_error, bad_request, ApiError};
use crate::SharedState;
use assistant::{dispatch, ToolCall, ToolReply};

/// Invoke one tool call. Unknown tool names and malformed arguments are
/// rejected with 400.
pub async fn invoke(
    State(state): State<SharedState>,
    Json(payload): Json<Value>,
) -> Result<Json<ToolReply>, ApiError> {
    let call: ToolCall = serde_json::from_value(payload)
        .map_err(|e| bad_request(format!("invalid tool call: {e}")))?;

    let mut state = state.write().await;
    let reply = dispatch(&mut state.store, call).map_err(assistant_error)?;
    Ok(Json(reply))
}
