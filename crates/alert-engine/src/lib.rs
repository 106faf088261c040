//! Alert Engine
//!
//! Converts noisy telemetry readings into a stable set of active alerts.
//! Each alert kind is classified against a three-band threshold policy:
//! an immediate warning band, a debounced caution band requiring two
//! consecutive readings, and a clear band that resets the debounce counter
//! and any acknowledgement. The gap between the caution and clear
//! thresholds acts as a hysteresis band that prevents flicker near a
//! boundary.

mod engine;
mod kinds;

pub use engine::AlertEngine;
pub use kinds::{ActiveAlert, AlertKind, ParseAlertKindError, Severity};
