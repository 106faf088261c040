//! Snapshot Range Validation

use crate::TelemetrySnapshot;
use thiserror::Error;

/// Errors for malformed telemetry snapshots
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    /// Value is NaN or infinite
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    /// Value outside the physically plausible range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), SnapshotError> {
    if !value.is_finite() {
        return Err(SnapshotError::NotFinite { field });
    }
    if value < min || value > max {
        return Err(SnapshotError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Check a snapshot against physically plausible channel ranges.
///
/// Callers run this before handing a snapshot to the alert engine, which
/// assumes well-formed readings.
pub fn validate(t: &TelemetrySnapshot) -> Result<(), SnapshotError> {
    check_range("o2_primary_pct", t.o2_primary_pct, 0.0, 100.0)?;
    check_range("o2_secondary_pct", t.o2_secondary_pct, 0.0, 100.0)?;
    check_range("suit_pressure_kpa", t.suit_pressure_kpa, 0.0, 60.0)?;
    check_range("heart_bpm", f64::from(t.heart_bpm), 0.0, 260.0)?;
    check_range("co2_ppm", f64::from(t.co2_ppm), 0.0, 60_000.0)?;
    check_range("battery_pct", t.battery_pct, 0.0, 100.0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TelemetrySim;

    #[test]
    fn test_seed_snapshot_is_valid() {
        assert!(validate(&TelemetrySim::seed_snapshot()).is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut t = TelemetrySim::seed_snapshot();
        t.suit_pressure_kpa = f64::NAN;
        assert_eq!(
            validate(&t),
            Err(SnapshotError::NotFinite {
                field: "suit_pressure_kpa"
            })
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut t = TelemetrySim::seed_snapshot();
        t.o2_primary_pct = 120.0;
        assert!(matches!(
            validate(&t),
            Err(SnapshotError::OutOfRange {
                field: "o2_primary_pct",
                ..
            })
        ));
    }

    #[test]
    fn test_generated_snapshots_are_valid() {
        let mut sim = TelemetrySim::new(5);
        for _ in 0..100 {
            assert!(validate(&sim.step(crate::StepMode::Nominal)).is_ok());
        }
    }
}
