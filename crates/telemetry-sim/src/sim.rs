//! Random-Walk Telemetry Simulator

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One reading of the six suit channels at a single instant.
///
/// `last_update_ms` is the simulated downlink latency and is ignored by the
/// alert engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Primary oxygen tank level (%)
    pub o2_primary_pct: f64,
    /// Secondary oxygen tank level (%)
    pub o2_secondary_pct: f64,
    /// Suit internal pressure (kPa)
    pub suit_pressure_kpa: f64,
    /// Heart rate (beats/min)
    pub heart_bpm: u32,
    /// Carbon dioxide concentration (ppm)
    pub co2_ppm: u32,
    /// Battery charge (%)
    pub battery_pct: f64,
    /// Simulated downlink latency (ms)
    pub last_update_ms: u64,
}

/// Starting point of every walk; `reset` returns the simulator here.
const SEED_SNAPSHOT: TelemetrySnapshot = TelemetrySnapshot {
    o2_primary_pct: 52.0,
    o2_secondary_pct: 100.0,
    suit_pressure_kpa: 29.8,
    heart_bpm: 98,
    co2_ppm: 4500,
    battery_pct: 28.0,
    last_update_ms: 0,
};

/// How a simulation step should move the channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepMode {
    /// Bounded random walk around the current state
    #[default]
    Nominal,
    /// Random walk plus a scripted degradation: O2 falls and CO2 rises
    /// enough to trip alerts within roughly 10-15 steps
    DemoTrend,
}

/// Bounded random-walk generator for suit telemetry.
///
/// The walk is driven by a seeded RNG, so two simulators built with the
/// same seed produce identical snapshot sequences and `reset` makes the
/// sequence start over.
pub struct TelemetrySim {
    seed: u64,
    rng: StdRng,
    state: TelemetrySnapshot,
}

impl TelemetrySim {
    /// Create a simulator at the seed state.
    pub fn new(seed: u64) -> Self {
        info!(seed, "creating telemetry simulator");
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            state: SEED_SNAPSHOT,
        }
    }

    /// Advance the walk one step and return the new snapshot.
    pub fn step(&mut self, mode: StepMode) -> TelemetrySnapshot {
        let rng = &mut self.rng;
        self.state.o2_primary_pct = jitter(rng, self.state.o2_primary_pct, 1.0, 20.0, 100.0);
        self.state.o2_secondary_pct = jitter(rng, self.state.o2_secondary_pct, 0.5, 50.0, 100.0);
        self.state.suit_pressure_kpa = jitter(rng, self.state.suit_pressure_kpa, 0.2, 25.0, 32.0);
        self.state.heart_bpm =
            jitter(rng, f64::from(self.state.heart_bpm), 3.0, 60.0, 160.0).round() as u32;
        self.state.co2_ppm =
            jitter(rng, f64::from(self.state.co2_ppm), 200.0, 300.0, 12_000.0).round() as u32;
        if rng.gen_bool(0.2) {
            self.state.battery_pct = (self.state.battery_pct - 1.0).clamp(0.0, 100.0);
        }

        if mode == StepMode::DemoTrend {
            self.state.o2_primary_pct = (self.state.o2_primary_pct - 0.8).clamp(20.0, 100.0);
            self.state.co2_ppm = (f64::from(self.state.co2_ppm) + 400.0).clamp(400.0, 12_000.0) as u32;
        }

        self.state.last_update_ms = 120 + self.rng.gen_range(0..=50);
        self.state.clone()
    }

    /// Return to the seed state and restart the RNG sequence.
    pub fn reset(&mut self) {
        info!(seed = self.seed, "telemetry simulator reset to seed state");
        self.rng = StdRng::seed_from_u64(self.seed);
        self.state = SEED_SNAPSHOT;
    }

    /// The snapshot the simulator starts from.
    pub fn seed_snapshot() -> TelemetrySnapshot {
        SEED_SNAPSHOT
    }
}

fn jitter(rng: &mut StdRng, x: f64, amplitude: f64, min: f64, max: f64) -> f64 {
    (x + rng.gen_range(-amplitude..=amplitude)).clamp(min, max)
}
