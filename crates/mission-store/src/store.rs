//! Mission Store Implementation

use alert_engine::{ActiveAlert, AlertEngine, AlertKind};
use telemetry_sim::{validate, SnapshotError, StepMode, TelemetrySim, TelemetrySnapshot};
use thiserror::Error;
use timer_registry::{Timer, TimerRegistry};
use tracing::info;

/// Seed for the telemetry walk when none is configured.
pub const DEFAULT_SEED: u64 = 20_290_714;

/// Caller-correctable errors for store commands
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// Timer label was empty or whitespace
    #[error("timer label must not be empty")]
    EmptyTimerLabel,

    /// Timer duration was zero
    #[error("timer duration must be positive")]
    ZeroTimerDuration,

    /// The simulator produced a malformed snapshot
    #[error(transparent)]
    BadSnapshot(#[from] SnapshotError),
}

/// All mutable demo state behind one handle.
pub struct MissionStore {
    sim: TelemetrySim,
    alerts: AlertEngine,
    timers: TimerRegistry,
}

impl MissionStore {
    /// Create a store with a freshly seeded simulator and empty state.
    pub fn new(seed: u64) -> Self {
        Self {
            sim: TelemetrySim::new(seed),
            alerts: AlertEngine::new(),
            timers: TimerRegistry::new(),
        }
    }

    /// Advance the simulator one step and classify the fresh snapshot.
    ///
    /// This is the only path that advances either the simulator or the
    /// alert engine, so every snapshot is evaluated exactly once and the
    /// debounce counters stay correct.
    pub fn sample(
        &mut self,
        mode: StepMode,
    ) -> Result<(TelemetrySnapshot, Vec<ActiveAlert>), CommandError> {
        let snapshot = self.sim.step(mode);
        validate(&snapshot)?;
        let alerts = self.alerts.evaluate(&snapshot);
        Ok((snapshot, alerts))
    }

    /// Acknowledge an alert kind. Idempotent.
    pub fn acknowledge(&mut self, kind: AlertKind) {
        self.alerts.acknowledge(kind);
    }

    /// Whether a kind is currently acknowledged.
    pub fn is_acknowledged(&self, kind: AlertKind) -> bool {
        self.alerts.is_acknowledged(kind)
    }

    /// Number of currently acknowledged kinds.
    pub fn acknowledged_count(&self) -> usize {
        self.alerts.acknowledged_count()
    }

    /// Start a countdown timer. Rejects empty labels and zero durations.
    pub fn start_timer(&mut self, label: &str, seconds: u32) -> Result<Timer, CommandError> {
        if label.trim().is_empty() {
            return Err(CommandError::EmptyTimerLabel);
        }
        if seconds == 0 {
            return Err(CommandError::ZeroTimerDuration);
        }
        Ok(self.timers.start(label, seconds))
    }

    /// List running timers ascending by expiry, reaping expired ones.
    pub fn list_timers(&mut self) -> Vec<Timer> {
        self.timers.list()
    }

    /// Number of stored timers.
    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Reinitialize everything at once: simulator back to its seed state,
    /// debounce counters zeroed, acknowledgements cleared, timers emptied.
    ///
    /// Atomic with respect to concurrent callers because the store is
    /// shared behind a single lock and `reset` takes `&mut self`.
    pub fn reset(&mut self) {
        info!("mission store reset");
        self.sim.reset();
        self.alerts.reset();
        self.timers.clear();
    }
}

impl Default for MissionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_returns_snapshot_and_alerts() {
        let mut store = MissionStore::new(1);
        let (snapshot, _alerts) = store.sample(StepMode::Nominal).unwrap();
        assert!(validate(&snapshot).is_ok());
    }

    #[test]
    fn test_seeded_stores_agree() {
        let mut a = MissionStore::new(77);
        let mut b = MissionStore::new(77);

        for _ in 0..20 {
            assert_eq!(
                a.sample(StepMode::Nominal).unwrap(),
                b.sample(StepMode::Nominal).unwrap()
            );
        }
    }

    #[test]
    fn test_timer_validation() {
        let mut store = MissionStore::default();

        assert_eq!(
            store.start_timer("", 30),
            Err(CommandError::EmptyTimerLabel)
        );
        assert_eq!(
            store.start_timer("   ", 30),
            Err(CommandError::EmptyTimerLabel)
        );
        assert_eq!(
            store.start_timer("check", 0),
            Err(CommandError::ZeroTimerDuration)
        );

        let timer = store.start_timer("check", 30).unwrap();
        assert_eq!(timer.label, "check");
        assert_eq!(store.timer_count(), 1);
    }

    #[test]
    fn test_reset_is_equivalent_to_fresh_store() {
        let mut store = MissionStore::new(5);

        // disturb every substructure: walk the simulator into the demo
        // trend, acknowledge an alert, start a timer
        for _ in 0..30 {
            store.sample(StepMode::DemoTrend).unwrap();
        }
        store.acknowledge(AlertKind::O2Low);
        store.start_timer("egress", 600).unwrap();

        store.reset();

        assert_eq!(store.timer_count(), 0);
        assert!(store.list_timers().is_empty());
        assert_eq!(store.acknowledged_count(), 0);

        // the walk restarts from the seed: identical to a fresh store
        let mut fresh = MissionStore::new(5);
        for _ in 0..10 {
            assert_eq!(
                store.sample(StepMode::Nominal).unwrap(),
                fresh.sample(StepMode::Nominal).unwrap()
            );
        }
    }

    #[test]
    fn test_demo_trend_eventually_raises_alerts() {
        let mut store = MissionStore::new(9);

        let mut saw_alert = false;
        for _ in 0..40 {
            let (_, alerts) = store.sample(StepMode::DemoTrend).unwrap();
            if !alerts.is_empty() {
                saw_alert = true;
                break;
            }
        }
        assert!(saw_alert, "demo trend never tripped an alert in 40 steps");
    }
}
