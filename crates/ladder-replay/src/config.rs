//! Replay configuration.

use std::path::Path;

use ladder_core::constants::DEFAULT_WINDOW_SIZE;
use ladder_feed::SyntheticConfig;
use serde::{Deserialize, Serialize};

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "LADDER_CONFIG";

/// Replay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Run name, used in log output
    pub name: String,
    /// Log level when `RUST_LOG` is unset
    pub log_level: String,
    /// Number of feature vectors kept in the history window
    pub window_size: usize,
    /// Number of synthetic events to replay
    pub events: usize,
    /// Seed for the synthetic generator
    pub seed: u64,
    /// Synthetic generator settings
    pub synthetic: SyntheticConfig,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            name: "tickladder".to_string(),
            log_level: "info".to_string(),
            window_size: DEFAULT_WINDOW_SIZE,
            events: 100_000,
            seed: 42,
            synthetic: SyntheticConfig::default(),
        }
    }
}

impl ReplayConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ReplayConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from the file named by `LADDER_CONFIG`, falling back to defaults
    pub fn from_env() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
