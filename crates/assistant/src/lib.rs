//! Assistant Layer
//!
//! Exposes the mission store as callable tools in the wire shape an
//! LLM-driven agent loop would use, and provides the deterministic
//! keyword-routed responder that stands in when no model is wired up.

mod chat;
mod tools;

pub use chat::{respond, ChatMessage, ChatReply, Role, ToolTrace};
pub use tools::{dispatch, AssistantError, TelemetryField, ToolCall, ToolReply};
