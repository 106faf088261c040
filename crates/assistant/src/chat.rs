//! Deterministic Responder
//!
//! Keyword-routed stand-in for the LLM tool loop: parses intent from the
//! user's message, drives the same tool dispatch the model would, and
//! composes a short voice-style reply together with the tool transcript.

use crate::tools::{project_fields, ToolCall, ToolReply};
use alert_engine::{ActiveAlert, AlertKind, Severity};
use mission_store::MissionStore;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use telemetry_sim::{StepMode, TelemetrySnapshot};
use tracing::debug;

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

/// A tool invocation recorded in the reply transcript.
#[derive(Debug, Clone, Serialize)]
pub struct ToolTrace {
    pub name: &'static str,
    pub result: ToolReply,
}

/// Assistant reply plus the tool transcript that produced it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub messages: Vec<ChatMessage>,
    pub tool_calls: Vec<ToolCall>,
    pub tool_outputs: Vec<ToolTrace>,
}

fn assistant_says(content: String) -> Vec<ChatMessage> {
    vec![ChatMessage {
        role: Role::Assistant,
        content,
    }]
}

fn unavailable() -> ChatReply {
    ChatReply {
        messages: assistant_says("Tool unavailable—retrying in 5 s.".to_string()),
        tool_calls: Vec::new(),
        tool_outputs: Vec::new(),
    }
}

fn status_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"status|check|telemetry").expect("valid regex"))
}

fn action_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"ack|acknowledge|start").expect("valid regex"))
}

fn duration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+)\s*(sec|secs|second|seconds|min|mins|minute|minutes)")
            .expect("valid regex")
    })
}

fn label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"timer\s*(?:for|:)?\s*([a-z0-9 \-']+)").expect("valid regex"))
}

fn label_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"start\s+a?\s*([a-z0-9 \-']+)\s*timer").expect("valid regex"))
}

/// Parse a naive spoken duration ("3 minutes", "90 sec") to seconds.
fn parse_duration_secs(text: &str) -> Option<u32> {
    let caps = duration_re().captures(text)?;
    let n: u32 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str();
    if unit.starts_with('m') {
        Some(n.saturating_mul(60))
    } else {
        Some(n)
    }
}

/// Extract a timer label from the message, defaulting to "check".
fn parse_timer_label(text: &str) -> String {
    let captured = label_re()
        .captures(text)
        .or_else(|| label_prefix_re().captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());

    match captured {
        Some(label) if !label.is_empty() => label,
        _ => "check".to_string(),
    }
}

fn compose_status(snapshot: &TelemetrySnapshot, alerts: &[ActiveAlert]) -> String {
    if let Some(worst) = alerts
        .iter()
        .find(|a| a.severity == Severity::Warning)
        .or_else(|| alerts.first())
    {
        let mut content = match worst.severity {
            Severity::Warning => format!("Warning—{}.", worst.message),
            Severity::Caution => format!("Caution—{}.", worst.message),
        };
        if worst.severity == Severity::Warning {
            content.push_str(" Acknowledge?");
        }
        content
    } else {
        format!(
            "Nominal. O₂ {:.0}%, Pressure {:.1} kPa, CO₂ {} ppm.",
            snapshot.o2_primary_pct, snapshot.suit_pressure_kpa, snapshot.co2_ppm
        )
    }
}

/// Answer one user message, recording every tool call made on the way.
pub fn respond(store: &mut MissionStore, user_text: &str) -> ChatReply {
    let text = user_text.to_lowercase();
    debug!("routing chat message: {}", text);

    if status_re().is_match(&text) {
        let call = ToolCall::GetTelemetry {
            fields: Some(crate::tools::TelemetryField::ALL.to_vec()),
        };
        let Ok((snapshot, alerts)) = store.sample(StepMode::Nominal) else {
            return unavailable();
        };
        let content = compose_status(&snapshot, &alerts);
        return ChatReply {
            messages: assistant_says(content),
            tool_calls: vec![call],
            tool_outputs: vec![ToolTrace {
                name: "get_telemetry",
                result: ToolReply::Telemetry {
                    telemetry: project_fields(&snapshot, None),
                    alerts,
                },
            }],
        };
    }

    if action_re().is_match(&text) {
        let mut tool_calls = Vec::new();
        let mut tool_outputs = Vec::new();
        let mut content = String::new();

        // a bare "ack" defaults to the O2 warning, mirroring the console
        let acked = text.contains("ack");
        if acked {
            tool_calls.push(ToolCall::AcknowledgeAlert {
                id: AlertKind::O2Low.as_str().to_string(),
            });
            store.acknowledge(AlertKind::O2Low);
            tool_outputs.push(ToolTrace {
                name: "acknowledge_alert",
                result: ToolReply::Acknowledged {
                    ok: true,
                    id: AlertKind::O2Low,
                },
            });
            content.push_str("Acknowledged O2 warning.");
        }

        if let Some(seconds) = parse_duration_secs(&text).filter(|s| *s > 0) {
            let label = parse_timer_label(&text);
            if let Ok(timer) = store.start_timer(&label, seconds) {
                tool_calls.push(ToolCall::StartTimer {
                    label: label.clone(),
                    seconds,
                });
                tool_outputs.push(ToolTrace {
                    name: "start_timer",
                    result: ToolReply::TimerStarted {
                        id: timer.id,
                        timers: store.list_timers(),
                    },
                });
                content.push_str(&format!(
                    " Timer '{}' set for {}:{:02}.",
                    label,
                    seconds / 60,
                    seconds % 60
                ));
            }
        }

        let content = content.trim().to_string();
        return ChatReply {
            messages: assistant_says(if content.is_empty() {
                "OK.".to_string()
            } else {
                content
            }),
            tool_calls,
            tool_outputs,
        };
    }

    unavailable()
}
