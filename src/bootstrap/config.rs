//! Configuration loader
//!
//! Reads `config.toml` into [`HistoryConfig`]. A missing file is not an
//! error: every setting has a default.

use std::path::Path;

use anyhow::Context;
use tracing::info;
use vc_core::HistoryConfig;

pub fn load_config(config_path: &Path) -> anyhow::Result<HistoryConfig> {
    if !config_path.exists() {
        info!(path = %config_path.display(), "no config file, using defaults");
        return Ok(HistoryConfig::default());
    }

    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let config = HistoryConfig::from_toml_str(&content)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))?;

    info!(
        path = %config_path.display(),
        capacity = config.history.capacity,
        poll_interval_ms = config.monitor.poll_interval_ms,
        "loaded config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};
    use vc_core::ConfigError;

    #[test]
    fn reads_values_from_toml() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
            [history]
            capacity = 25

            [monitor]
            poll_interval_ms = 250
            max_capture_bytes = 4096
            "#,
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.history.capacity, 25);
        assert_eq!(config.monitor.poll_interval_ms, 250);
        assert_eq!(config.monitor.max_capture_bytes, 4096);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, HistoryConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[history]\ncapacity = 3\n").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.history.capacity, 3);
        assert_eq!(config.monitor, HistoryConfig::default().monitor);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[history]\ncapacity = 0\n").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[history\ncapacity = ").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse(_))
        ));
    }
}
