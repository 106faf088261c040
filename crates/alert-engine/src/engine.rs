//! Alert Engine Implementation

use crate::{ActiveAlert, AlertKind, Severity};
use std::collections::HashSet;
use telemetry_sim::TelemetrySnapshot;
use tracing::{debug, info};

/// Consecutive caution-band readings required before a caution surfaces.
const DEBOUNCE_TRIP: u8 = 2;

/// Classification of one reading against a kind's thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    /// Trips immediately, no debounce delay
    Warning,
    /// Trips only after consecutive readings
    Caution,
    /// Fully recovered: resets debounce and acknowledgement
    Clear,
    /// Between the caution and clear thresholds: resets debounce only
    Recovering,
}

fn classify(kind: AlertKind, t: &TelemetrySnapshot) -> Band {
    match kind {
        AlertKind::O2Low => {
            let o2 = t.o2_primary_pct;
            if o2 < 48.0 {
                Band::Warning
            } else if o2 < 55.0 {
                Band::Caution
            } else if o2 >= 58.0 {
                Band::Clear
            } else {
                Band::Recovering
            }
        }
        AlertKind::PressureLow => {
            let p = t.suit_pressure_kpa;
            if p < 28.5 {
                Band::Warning
            } else if p < 29.6 {
                Band::Caution
            } else {
                // clear threshold coincides with the caution boundary
                Band::Clear
            }
        }
        AlertKind::Co2High => {
            let co2 = t.co2_ppm;
            if co2 > 9000 {
                Band::Warning
            } else if co2 > 7000 {
                Band::Caution
            } else if co2 < 6500 {
                Band::Clear
            } else {
                Band::Recovering
            }
        }
        AlertKind::BatteryLow => {
            let b = t.battery_pct;
            if b <= 15.0 {
                Band::Warning
            } else if b <= 25.0 {
                Band::Caution
            } else if b >= 27.0 {
                Band::Clear
            } else {
                Band::Recovering
            }
        }
        AlertKind::HeartRateHigh => {
            let hr = t.heart_bpm;
            if hr > 140 {
                Band::Warning
            } else if hr > 120 {
                Band::Caution
            } else if hr < 115 {
                Band::Clear
            } else {
                Band::Recovering
            }
        }
    }
}

fn message(kind: AlertKind, t: &TelemetrySnapshot) -> String {
    match kind {
        AlertKind::O2Low => format!(
            "Primary O₂ {:.0}%, Secondary {:.0}%",
            t.o2_primary_pct, t.o2_secondary_pct
        ),
        AlertKind::PressureLow => format!("Suit pressure {:.1} kPa", t.suit_pressure_kpa),
        AlertKind::Co2High => format!("CO₂ {} ppm", t.co2_ppm),
        AlertKind::BatteryLow => format!("Battery {:.0}%", t.battery_pct),
        AlertKind::HeartRateHigh => format!("Heart rate {} bpm", t.heart_bpm),
    }
}

/// Stateful classifier turning snapshot streams into active alerts.
pub struct AlertEngine {
    /// Consecutive caution-band readings per kind, in `AlertKind::ALL` order
    consecutive: [u8; AlertKind::ALL.len()],
    /// Kinds the user has acknowledged; cleared on recovery
    acknowledged: HashSet<AlertKind>,
}

impl AlertEngine {
    /// Create an engine with zeroed counters and no acknowledgements.
    pub fn new() -> Self {
        Self {
            consecutive: [0; AlertKind::ALL.len()],
            acknowledged: HashSet::new(),
        }
    }

    /// Classify one snapshot and advance debounce state.
    ///
    /// Must be called exactly once per snapshot: the counters advance as a
    /// side effect, so re-evaluating the same snapshot double-counts
    /// consecutive readings. Output order follows [`AlertKind::ALL`].
    pub fn evaluate(&mut self, t: &TelemetrySnapshot) -> Vec<ActiveAlert> {
        let mut active = Vec::new();

        for kind in AlertKind::ALL {
            let idx = kind.index();
            match classify(kind, t) {
                Band::Warning => {
                    self.consecutive[idx] = DEBOUNCE_TRIP;
                    active.push(self.emit(kind, Severity::Warning, t));
                }
                Band::Caution => {
                    self.consecutive[idx] = self.consecutive[idx].saturating_add(1);
                    if self.consecutive[idx] >= DEBOUNCE_TRIP {
                        active.push(self.emit(kind, Severity::Caution, t));
                    }
                }
                Band::Clear => {
                    self.consecutive[idx] = 0;
                    if self.acknowledged.remove(&kind) {
                        debug!(kind = %kind, "acknowledgement cleared on recovery");
                    }
                }
                Band::Recovering => {
                    self.consecutive[idx] = 0;
                }
            }
        }

        active
    }

    fn emit(&self, kind: AlertKind, severity: Severity, t: &TelemetrySnapshot) -> ActiveAlert {
        ActiveAlert {
            kind,
            severity,
            message: message(kind, t),
            acknowledged: self.acknowledged.contains(&kind),
        }
    }

    /// Acknowledge an alert kind.
    ///
    /// Idempotent, and valid pre-emptively for kinds with no active alert;
    /// the flag is cleared automatically when the channel recovers.
    pub fn acknowledge(&mut self, kind: AlertKind) {
        if self.acknowledged.insert(kind) {
            info!(kind = %kind, "alert acknowledged");
        }
    }

    /// Whether a kind is currently acknowledged.
    pub fn is_acknowledged(&self, kind: AlertKind) -> bool {
        self.acknowledged.contains(&kind)
    }

    /// Number of currently acknowledged kinds.
    pub fn acknowledged_count(&self) -> usize {
        self.acknowledged.len()
    }

    /// Zero all counters and clear every acknowledgement.
    pub fn reset(&mut self) {
        self.consecutive = [0; AlertKind::ALL.len()];
        self.acknowledged.clear();
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new()
    }
}
