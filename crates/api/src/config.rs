//! Server Configuration

use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Server settings, overridable via `SUITOPS_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Seed for the telemetry random walk
    #[serde(default = "default_seed")]
    pub telemetry_seed: u64,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_seed() -> u64 {
    mission_store::DEFAULT_SEED
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            telemetry_seed: default_seed(),
        }
    }
}

impl ServerConfig {
    /// Load settings from the environment (`SUITOPS_BIND_ADDR`,
    /// `SUITOPS_TELEMETRY_SEED`), falling back to the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("SUITOPS"))
            .build()?
            .try_deserialize()
    }
}
