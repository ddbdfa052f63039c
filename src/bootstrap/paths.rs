use std::path::{Path, PathBuf};

use anyhow::anyhow;

const APP_DIR_NAME: &str = "vaultclip";

/// `VC_PROFILE=dev` keeps a second instance's config and logs apart.
fn resolved_app_dir_name() -> String {
    match std::env::var("VC_PROFILE") {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_file: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    /// Resolve paths from the platform config and local data directories.
    pub fn resolve() -> anyhow::Result<Self> {
        let config_base =
            dirs::config_dir().ok_or_else(|| anyhow!("Unable to get config directory"))?;
        let data_base = dirs::data_local_dir()
            .ok_or_else(|| anyhow!("Unable to get local data directory"))?;
        Ok(Self::from_bases(&config_base, &data_base))
    }

    pub fn from_bases(config_base: &Path, data_base: &Path) -> Self {
        let dir = resolved_app_dir_name();
        Self {
            config_file: config_base.join(&dir).join("config.toml"),
            logs_dir: data_base.join(&dir).join("logs"),
        }
    }
}
