//! Chat Route

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::SharedState;
use assistant::{respond, ChatMessage, ChatReply, Role};

/// Request body for the chat endpoint
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Route the latest user message through the deterministic responder
pub async fn chat(
    State(state): State<SharedState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    let last = request.messages.last().filter(|m| m.role == Role::User);

    let Some(message) = last else {
        // nothing to answer; mirror the console's empty reply
        return Json(ChatReply {
            messages: Vec::new(),
            tool_calls: Vec::new(),
            tool_outputs: Vec::new(),
        });
    };

    let mut state = state.write().await;
    Json(respond(&mut state.store, &message.content))
}
