//! Configuration management for tracelens.
//!
//! Loads configuration from TOML files. The aggregation interval and the
//! default transaction type are system-wide values provided by the backend
//! deployment; the refresh section tunes coordinator timing.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub aggregate: AggregateConfig,
    pub backend: BackendConfig,
    pub refresh: RefreshConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./tracelens.toml`
    /// 2. `~/.config/tracelens/tracelens.toml`
    ///
    /// Returns default config if no file found.
    pub fn load_default() -> Self {
        if let Ok(config) = Self::load("tracelens.toml") {
            return config;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("tracelens").join("tracelens.toml");
            if let Ok(config) = Self::load(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("tracelens.toml")
    }
}

/// General application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Transaction type shown when the location does not name one.
    pub default_transaction_type: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_transaction_type: "Web".to_string(),
        }
    }
}

/// Aggregation configuration reported by the backend deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateConfig {
    /// Size of the backend's fixed aggregation buckets, in seconds.
    pub interval_secs: u32,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self { interval_secs: 300 }
    }
}

/// Backend endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the dashboard backend.
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
        }
    }
}

/// Refresh coordination tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Head start given to the series fetch before the heavier summaries
    /// fetch is issued, in milliseconds.
    pub table_head_start_ms: u64,
    /// Quiet period after the last zoom event before a refresh fires,
    /// in milliseconds.
    pub zoom_settle_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            table_head_start_ms: 5,
            zoom_settle_ms: 100,
        }
    }
}
