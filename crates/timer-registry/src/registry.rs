//! Timer Registry Implementation

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// A countdown timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    /// Opaque unique token
    pub id: Uuid,
    /// Free-text label, e.g. "suit check"
    pub label: String,
    /// Expiry instant
    pub ends_at: DateTime<Utc>,
}

/// In-memory registry of countdown timers with lazy reaping.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    timers: HashMap<Uuid, Timer>,
}

impl TimerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a timer ending `duration_secs` after `now`.
    ///
    /// Argument validation happens at the store boundary; the registry
    /// stores whatever expiry it is given.
    pub fn start_at(&mut self, label: &str, duration_secs: u32, now: DateTime<Utc>) -> Timer {
        let timer = Timer {
            id: Uuid::new_v4(),
            label: label.to_string(),
            ends_at: now + Duration::seconds(i64::from(duration_secs)),
        };
        info!(id = %timer.id, label, duration_secs, "timer started");
        self.timers.insert(timer.id, timer.clone());
        timer
    }

    /// Start a timer against the wall clock.
    pub fn start(&mut self, label: &str, duration_secs: u32) -> Timer {
        self.start_at(label, duration_secs, Utc::now())
    }

    /// Drop every timer with `ends_at <= now`, then return the survivors
    /// ascending by expiry.
    pub fn list_at(&mut self, now: DateTime<Utc>) -> Vec<Timer> {
        let before = self.timers.len();
        self.timers.retain(|_, t| t.ends_at > now);
        let reaped = before - self.timers.len();
        if reaped > 0 {
            debug!(reaped, "expired timers reaped");
        }

        let mut remaining: Vec<Timer> = self.timers.values().cloned().collect();
        remaining.sort_by_key(|t| t.ends_at);
        remaining
    }

    /// List timers against the wall clock.
    pub fn list(&mut self) -> Vec<Timer> {
        self.list_at(Utc::now())
    }

    /// Remove every timer.
    pub fn clear(&mut self) {
        if !self.timers.is_empty() {
            info!(count = self.timers.len(), "timer registry cleared");
        }
        self.timers.clear();
    }

    /// Number of stored timers, expired or not.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether the registry holds no timers.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
