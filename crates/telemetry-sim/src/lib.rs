//! Telemetry Source
//!
//! Seeded random-walk simulator for EVA suit telemetry, plus range
//! validation for snapshots before they reach the alert engine.

mod sim;
mod validate;

pub use sim::{StepMode, TelemetrySim, TelemetrySnapshot};
pub use validate::{validate, SnapshotError};
