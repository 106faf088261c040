//! Route Handlers

pub mod alerts;
pub mod chat;
pub mod restart;
pub mod telemetry;
pub mod timers;
pub mod tools;

use assistant::AssistantError;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// JSON error body for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

pub fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

pub fn internal_error(message: impl Into<String>) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Map assistant-layer errors onto HTTP statuses: caller-correctable
/// arguments are 400, anything else is 500.
pub fn assistant_error(e: AssistantError) -> ApiError {
    if e.is_invalid_argument() {
        bad_request(e.to_string())
    } else {
        internal_error(e.to_string())
    }
}
