//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::RavelloConfig;

/// Environment variable naming an alternative configuration file.
pub const CONFIG_ENV: &str = "RAVELLO_CONFIG";

/// Production implementation of `ConfigStore` that reads a YAML file on disk.
///
/// The file is optional; when it does not exist the defaults apply.
#[derive(Debug, Default)]
pub struct YamlConfigStore {
    path: Option<PathBuf>,
}

impl YamlConfigStore {
    /// Store that honours `RAVELLO_CONFIG`, else `~/.ravello/config.yaml`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            path: std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        }
    }

    /// Store reading exactly `path`.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<RavelloConfig> {
        let path = self.path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(RavelloConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".ravello").join("config.yaml"))
    }
}
