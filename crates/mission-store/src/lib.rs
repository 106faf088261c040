//! Mission Store
//!
//! Single owner of all mutable demo state: the telemetry simulator, the
//! alert engine, and the timer registry. Callers share one store handle
//! behind one lock, so read-modify-write sequences inside the engine are
//! never interleaved and `reset` is indivisible.

mod store;

pub use store::{CommandError, MissionStore, DEFAULT_SEED};
