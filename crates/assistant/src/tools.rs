//! Tool-Call Layer
//!
//! Tool calls arrive as `{ "name": …, "arguments": … }` and dispatch
//! against the mission store.

use alert_engine::{ActiveAlert, AlertKind, ParseAlertKindError};
use mission_store::{CommandError, MissionStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use telemetry_sim::{StepMode, TelemetrySnapshot};
use thiserror::Error;
use timer_registry::Timer;
use tracing::debug;
use uuid::Uuid;

/// Telemetry channels a tool call may restrict the payload to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryField {
    O2PrimaryPct,
    O2SecondaryPct,
    SuitPressureKpa,
    HeartBpm,
    Co2Ppm,
    BatteryPct,
}

impl TelemetryField {
    pub const ALL: [TelemetryField; 6] = [
        TelemetryField::O2PrimaryPct,
        TelemetryField::O2SecondaryPct,
        TelemetryField::SuitPressureKpa,
        TelemetryField::HeartBpm,
        TelemetryField::Co2Ppm,
        TelemetryField::BatteryPct,
    ];

    /// JSON key of the channel in a serialized snapshot.
    pub const fn key(self) -> &'static str {
        match self {
            TelemetryField::O2PrimaryPct => "o2_primary_pct",
            TelemetryField::O2SecondaryPct => "o2_secondary_pct",
            TelemetryField::SuitPressureKpa => "suit_pressure_kpa",
            TelemetryField::HeartBpm => "heart_bpm",
            TelemetryField::Co2Ppm => "co2_ppm",
            TelemetryField::BatteryPct => "battery_pct",
        }
    }
}

/// A callable operation, as requested by the console UI or an agent loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ToolCall {
    /// Fetch a fresh snapshot (and its alerts), optionally restricted to a
    /// subset of channels
    GetTelemetry {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<TelemetryField>>,
    },
    /// Acknowledge and silence an active alert
    AcknowledgeAlert { id: String },
    /// Start a countdown timer for checkbacks or procedures
    StartTimer { label: String, seconds: u32 },
}

/// Result of a dispatched tool call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolReply {
    Telemetry {
        telemetry: Value,
        alerts: Vec<ActiveAlert>,
    },
    Acknowledged {
        ok: bool,
        id: AlertKind,
    },
    TimerStarted {
        id: Uuid,
        timers: Vec<Timer>,
    },
}

/// Errors surfaced to the tool caller
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Alert id outside the closed enumeration
    #[error(transparent)]
    BadAlertKind(#[from] ParseAlertKindError),

    /// Store rejected the command arguments
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl AssistantError {
    /// Whether the error is correctable by the caller (as opposed to an
    /// internal fault such as a malformed simulator snapshot).
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(
            self,
            AssistantError::Command(CommandError::BadSnapshot(_))
        )
    }
}

/// Run one tool call against the store.
pub fn dispatch(store: &mut MissionStore, call: ToolCall) -> Result<ToolReply, AssistantError> {
    debug!(?call, "dispatching tool call");
    match call {
        ToolCall::GetTelemetry { fields } => {
            let (snapshot, alerts) = store.sample(StepMode::Nominal)?;
            Ok(ToolReply::Telemetry {
                telemetry: project_fields(&snapshot, fields.as_deref()),
                alerts,
            })
        }
        ToolCall::AcknowledgeAlert { id } => {
            let kind: AlertKind = id.parse()?;
            store.acknowledge(kind);
            Ok(ToolReply::Acknowledged { ok: true, id: kind })
        }
        ToolCall::StartTimer { label, seconds } => {
            let timer = store.start_timer(&label, seconds)?;
            Ok(ToolReply::TimerStarted {
                id: timer.id,
                timers: store.list_timers(),
            })
        }
    }
}

/// Restrict a serialized snapshot to the requested channels.
///
/// Pure post-filter: engine state is untouched, and an empty or missing
/// field list returns the full snapshot.
pub(crate) fn project_fields(
    snapshot: &TelemetrySnapshot,
    fields: Option<&[TelemetryField]>,
) -> Value {
    let full = serde_json::to_value(snapshot).unwrap_or(Value::Null);
    let fields = match fields {
        None | Some([]) => return full,
        Some(fields) => fields,
    };

    let mut out = serde_json::Map::new();
    if let Value::Object(map) = full {
        for field in fields {
            if let Some(v) = map.get(field.key()) {
                out.insert(field.key().to_string(), v.clone());
            }
        }
    }
    Value::Object(out)
}
