//! Locating and loading the engine config file

use super::{ConfigError, EngineConfig};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Where the config file lives when no path was given
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("LARDER_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from("larder.toml");
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir().map(|dir| dir.join("larder").join("config.toml"))
}

pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader for an explicit file, falling back to [`default_config_path`]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.or_else(default_config_path),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the file if present, apply environment overrides and validate
    pub async fn load(&self) -> Result<EngineConfig, ConfigError> {
        let mut config = match &self.path {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(path).await?;
                debug!("Loaded engine config from {}", path.display());
                EngineConfig::from_toml(&content)?
            }
            _ => {
                debug!("No engine config file found, using defaults");
                EngineConfig::default()
            }
        };

        config.merge_env_vars()?;
        config.validate()?;
        Ok(config)
    }
}
