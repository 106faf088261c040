//! Alert Kinds and Severities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of suit alert conditions. No dynamic registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// Primary oxygen tank running low
    #[serde(rename = "O2_LOW")]
    O2Low,
    /// Suit pressure below nominal
    #[serde(rename = "P_LOW")]
    PressureLow,
    /// Carbon dioxide scrubber falling behind
    #[serde(rename = "CO2_HIGH")]
    Co2High,
    /// Battery charge running low
    #[serde(rename = "BATT_LOW")]
    BatteryLow,
    /// Elevated heart rate
    #[serde(rename = "HR_HIGH")]
    HeartRateHigh,
}

impl AlertKind {
    /// Fixed check order; evaluation output preserves it.
    pub const ALL: [AlertKind; 5] = [
        AlertKind::O2Low,
        AlertKind::PressureLow,
        AlertKind::Co2High,
        AlertKind::BatteryLow,
        AlertKind::HeartRateHigh,
    ];

    /// Wire name, e.g. `O2_LOW`.
    pub const fn as_str(self) -> &'static str {
        match self {
            AlertKind::O2Low => "O2_LOW",
            AlertKind::PressureLow => "P_LOW",
            AlertKind::Co2High => "CO2_HIGH",
            AlertKind::BatteryLow => "BATT_LOW",
            AlertKind::HeartRateHigh => "HR_HIGH",
        }
    }

    /// Position in [`AlertKind::ALL`], used to index per-kind counters.
    pub(crate) const fn index(self) -> usize {
        match self {
            AlertKind::O2Low => 0,
            AlertKind::PressureLow => 1,
            AlertKind::Co2High => 2,
            AlertKind::BatteryLow => 3,
            AlertKind::HeartRateHigh => 4,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an id outside the closed alert enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown alert kind: {0}")]
pub struct ParseAlertKindError(pub String);

impl FromStr for AlertKind {
    type Err = ParseAlertKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "O2_LOW" => Ok(AlertKind::O2Low),
            "P_LOW" => Ok(AlertKind::PressureLow),
            "CO2_HIGH" => Ok(AlertKind::Co2High),
            "BATT_LOW" => Ok(AlertKind::BatteryLow),
            "HR_HIGH" => Ok(AlertKind::HeartRateHigh),
            other => Err(ParseAlertKindError(other.to_string())),
        }
    }
}

/// Alert severity, ordered `Caution < Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Caution,
    Warning,
}

/// An alert derived from the latest evaluation.
///
/// Recomputed fresh on every `evaluate` call; never stored. Field names on
/// the wire match the mission console UI (`id`, `level`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveAlert {
    #[serde(rename = "id")]
    pub kind: AlertKind,
    #[serde(rename = "level")]
    pub severity: Severity,
    pub message: String,
    pub acknowledged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in AlertKind::ALL {
            assert_eq!(kind.as_str().parse::<AlertKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = "THRUSTER_LOW".parse::<AlertKind>().unwrap_err();
        assert_eq!(err, ParseAlertKindError("THRUSTER_LOW".to_string()));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Caution < Severity::Warning);
    }

    #[test]
    fn test_alert_wire_shape() {
        let alert = ActiveAlert {
            kind: AlertKind::O2Low,
            severity: Severity::Warning,
            message: "Primary O₂ 45%, Secondary 100%".to_string(),
            acknowledged: false,
        };

        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["id"], "O2_LOW");
        assert_eq!(json["level"], "warning");
        assert_eq!(json["acknowledged"], false);
    }
}
