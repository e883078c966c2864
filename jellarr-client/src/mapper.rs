//! Conversion between `jellarr-core` types and the server's
//! `ServerConfiguration` JSON document.
//!
//! Only the handful of keys we manage are modelled. Everything else in the
//! document is carried through untouched as raw JSON.

use anyhow::{Context, Result};
use jellarr_core::{
    PluginRepository, SystemSpec, SystemState, TrickplayOptions, TrickplayOptionsSpec,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The managed subset of the server's `ServerConfiguration`.
///
/// All fields are optional: the server may omit or null any of them, and a
/// patch only carries the fields that are being set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_metrics: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_repositories: Option<Vec<RepositoryInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trickplay_options: Option<TrickplayOptionsDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepositoryInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrickplayOptionsDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_hw_acceleration: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_hw_encoding: Option<bool>,
}

impl From<&TrickplayOptionsDto> for TrickplayOptions {
    fn from(dto: &TrickplayOptionsDto) -> Self {
        TrickplayOptions {
            enable_hw_acceleration: dto.enable_hw_acceleration.unwrap_or_default(),
            enable_hw_encoding: dto.enable_hw_encoding.unwrap_or_default(),
        }
    }
}

impl From<&TrickplayOptionsSpec> for TrickplayOptionsDto {
    fn from(spec: &TrickplayOptionsSpec) -> Self {
        TrickplayOptionsDto {
            enable_hw_acceleration: spec.enable_hw_acceleration,
            enable_hw_encoding: spec.enable_hw_encoding,
        }
    }
}

pub fn from_repository_infos(repos: &[RepositoryInfo]) -> Vec<PluginRepository> {
    repos
        .iter()
        .map(|r| PluginRepository {
            name: r.name.clone().unwrap_or_default(),
            url: r.url.clone().unwrap_or_default(),
            enabled: r.enabled.unwrap_or_default(),
        })
        .collect()
}

pub fn to_repository_infos(repos: &[PluginRepository]) -> Vec<RepositoryInfo> {
    repos
        .iter()
        .map(|r| RepositoryInfo {
            name: Some(r.name.clone()),
            url: Some(r.url.clone()),
            enabled: Some(r.enabled),
        })
        .collect()
}

impl From<&ServerConfiguration> for SystemState {
    fn from(config: &ServerConfiguration) -> Self {
        SystemState {
            enable_metrics: config.enable_metrics.unwrap_or_default(),
            plugin_repositories: config
                .plugin_repositories
                .as_deref()
                .map(from_repository_infos)
                .unwrap_or_default(),
            trickplay_options: config
                .trickplay_options
                .as_ref()
                .map(TrickplayOptions::from)
                .unwrap_or_default(),
        }
    }
}

impl From<&SystemSpec> for ServerConfiguration {
    fn from(spec: &SystemSpec) -> Self {
        ServerConfiguration {
            enable_metrics: spec.enable_metrics,
            plugin_repositories: spec
                .plugin_repositories
                .as_deref()
                .map(to_repository_infos),
            trickplay_options: spec.trickplay_options.as_ref().map(TrickplayOptionsDto::from),
        }
    }
}

/// Read the managed fields out of a full configuration document.
pub fn system_state_from_document(document: &Value) -> Result<SystemState> {
    let config: ServerConfiguration = serde_json::from_value(document.clone())
        .context("Could not deserialize server configuration")?;
    Ok(SystemState::from(&config))
}

/// A JSON merge patch (RFC 7396) that sets exactly the present fields of `spec`.
pub fn merge_patch(spec: &SystemSpec) -> Result<Value> {
    serde_json::to_value(ServerConfiguration::from(spec))
        .context("Could not serialize system configuration patch")
}

/// Apply the present fields of `spec` to a full configuration document.
///
/// Nested objects are merged key by key, so `TrickplayOptions` keys we do not
/// manage survive. Arrays are replaced wholesale.
pub fn apply_spec(document: &mut Value, spec: &SystemSpec) -> Result<()> {
    let patch = merge_patch(spec)?;
    json_patch::merge(document, &patch);
    Ok(())
}
