use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A plugin repository as declared in a config file or reported by the server.
///
/// Repositories have no identity beyond the full `(name, url, enabled)` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PluginRepository {
    pub name: String,
    pub url: String,
    pub enabled: bool,
}

impl PluginRepository {
    pub fn new(name: impl Into<String>, url: impl Into<String>, enabled: bool) -> Self {
        PluginRepository {
            name: name.into(),
            url: url.into(),
            enabled,
        }
    }
}

/// Lexicographic on name, then url, then enabled with `true` first.
impl Ord for PluginRepository {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.url.cmp(&other.url))
            // reversed: enabled repositories sort first
            .then_with(|| other.enabled.cmp(&self.enabled))
    }
}
impl PartialOrd for PluginRepository {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Trickplay settings as held by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrickplayOptions {
    pub enable_hw_acceleration: bool,
    pub enable_hw_encoding: bool,
}

impl TrickplayOptions {
    /// Present sub-fields of `spec` replace, absent ones are kept.
    pub fn merged_with(&self, spec: &TrickplayOptionsSpec) -> TrickplayOptions {
        TrickplayOptions {
            enable_hw_acceleration: spec
                .enable_hw_acceleration
                .unwrap_or(self.enable_hw_acceleration),
            enable_hw_encoding: spec.enable_hw_encoding.unwrap_or(self.enable_hw_encoding),
        }
    }

    pub fn to_spec(&self) -> TrickplayOptionsSpec {
        TrickplayOptionsSpec {
            enable_hw_acceleration: Some(self.enable_hw_acceleration),
            enable_hw_encoding: Some(self.enable_hw_encoding),
        }
    }
}

/// The desired trickplay settings. Like [`SystemSpec`], every sub-field is
/// optional and `None` leaves the server's value alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TrickplayOptionsSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_hw_acceleration: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_hw_encoding: Option<bool>,
}

/// The desired system configuration.
///
/// `None` means "leave this field alone", which is not the same as any value,
/// in particular not the same as `Some(false)` or `Some(vec![])`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SystemSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_metrics: Option<bool>,

    /// When present, the authoritative set of repositories, even if empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_repositories: Option<Vec<PluginRepository>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trickplay_options: Option<TrickplayOptionsSpec>,
}

impl SystemSpec {
    /// True when the spec would not touch any field.
    pub fn is_empty(&self) -> bool {
        self.enable_metrics.is_none()
            && self.plugin_repositories.is_none()
            && self.trickplay_options.is_none()
    }
}

/// The system configuration as currently held by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemState {
    pub enable_metrics: bool,
    pub plugin_repositories: Vec<PluginRepository>,
    pub trickplay_options: TrickplayOptions,
}

impl SystemState {
    /// The state the server should hold after `spec` has been applied as a
    /// partial update: present fields replace, absent fields are kept.
    pub fn merged_with(&self, spec: &SystemSpec) -> SystemState {
        SystemState {
            enable_metrics: spec.enable_metrics.unwrap_or(self.enable_metrics),
            plugin_repositories: spec
                .plugin_repositories
                .clone()
                .unwrap_or_else(|| self.plugin_repositories.clone()),
            trickplay_options: match &spec.trickplay_options {
                Some(options) => self.trickplay_options.merged_with(options),
                None => self.trickplay_options,
            },
        }
    }

    /// A spec with every field present, describing exactly this state.
    pub fn to_spec(&self) -> SystemSpec {
        SystemSpec {
            enable_metrics: Some(self.enable_metrics),
            plugin_repositories: Some(self.plugin_repositories.clone()),
            trickplay_options: Some(self.trickplay_options.to_spec()),
        }
    }
}
