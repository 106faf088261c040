//! Timer Registry
//!
//! User-requested countdown timers. Expired entries are removed the first
//! time a listing observes them; there is no background sweep, no cancel,
//! and no renewal.

mod registry;

pub use registry::{Timer, TimerRegistry};
