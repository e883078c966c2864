//! Loading of the desired-state document.
//!
//! A config file is YAML:
//!
//! ```yaml
//! version: 1
//! base_url: "http://localhost:8096"
//! system:
//!   enableMetrics: true
//!   pluginRepositories:
//!     - name: "Jellyfin Official"
//!       url: "https://repo.jellyfin.org/releases/plugin/manifest.json"
//!       enabled: true
//!   trickplayOptions:
//!     enableHwAcceleration: true
//! ```
//!
//! Anything left out of `system` is left untouched on the server.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::{SystemSpec, SystemState};

/// The config file format version written by `dump`.
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RootConfig {
    pub version: u32,
    pub base_url: String,
    #[serde(default)]
    pub system: SystemSpec,
}

impl RootConfig {
    /// A config that would pin every field to the values in `state`.
    pub fn from_state(base_url: impl Into<String>, state: &SystemState) -> RootConfig {
        RootConfig {
            version: CONFIG_VERSION,
            base_url: base_url.into(),
            system: state.to_spec(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.version == 0 {
            bail!("version must be a positive integer");
        }
        Url::parse(&self.base_url)
            .with_context(|| format!("base_url must be a valid URL: {:?}", self.base_url))?;
        for (i, repo) in self
            .system
            .plugin_repositories
            .iter()
            .flatten()
            .enumerate()
        {
            if repo.name.is_empty() {
                bail!("system.pluginRepositories[{}]: name cannot be empty", i);
            }
            Url::parse(&repo.url).with_context(|| {
                format!(
                    "system.pluginRepositories[{}]: url must be a valid URL: {:?}",
                    i, repo.url
                )
            })?;
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Could not serialize config")
    }
}

/// Parse and validate a config document.
pub fn parse(content: &str) -> Result<RootConfig> {
    let config: RootConfig = serde_yaml::from_str(content).context("Could not parse config")?;
    config.validate().context("Invalid config")?;
    Ok(config)
}

/// Read, parse and validate a config file.
pub fn load(path: &Path) -> Result<RootConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    parse(&content).with_context(|| format!("Failed to load config file {}", path.display()))
}
