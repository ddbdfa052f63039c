//! History engine configuration.
//!
//! Plain data parsed from TOML. Every field has a default so an empty or
//! missing file yields a working configuration.
//!
//! ```toml
//! [history]
//! capacity = 100
//!
//! [monitor]
//! poll_interval_ms = 500
//! max_capture_bytes = 1000000
//! ```

mod defaults;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clipboard::CapturePolicy;

pub use defaults::{DEFAULT_CAPACITY, DEFAULT_POLL_INTERVAL_MS, MAX_CAPACITY};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of records kept in memory.
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    pub poll_interval_ms: u64,
    /// Larger captures are dropped before reaching the engine.
    pub max_capture_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HistoryConfig {
    pub history: HistorySettings,
    pub monitor: MonitorSettings,
}

impl HistoryConfig {
    /// Parse a TOML document, filling gaps with defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: HistoryConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.capacity == 0 {
            return Err(ConfigError::Invalid("history.capacity must be at least 1".into()));
        }
        if self.history.capacity > MAX_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "history.capacity must be at most {MAX_CAPACITY}"
            )));
        }
        if self.monitor.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "monitor.poll_interval_ms must be at least 1".into(),
            ));
        }
        if self.monitor.max_capture_bytes == 0 {
            return Err(ConfigError::Invalid(
                "monitor.max_capture_bytes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.monitor.poll_interval_ms)
    }

    pub fn capture_policy(&self) -> CapturePolicy {
        CapturePolicy::new(self.monitor.max_capture_bytes)
    }
}
