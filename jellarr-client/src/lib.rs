pub mod mapper;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use jellarr_core::{SystemClient, SystemSpec, SystemState};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::debug;

const SYSTEM_CONFIGURATION_PATH: &str = "/System/Configuration";

/// Talks to a single Jellyfin server with an API key.
pub struct JellyfinClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl JellyfinClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Could not create HTTP client")?;
        Ok(Self::with_http_client(http, base_url, api_key))
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        JellyfinClient {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorization(&self) -> String {
        format!("MediaBrowser Token=\"{}\"", self.api_key)
    }

    /// Fetch the full `ServerConfiguration` document.
    pub async fn get_configuration(&self) -> Result<Value> {
        let url = self.url(SYSTEM_CONFIGURATION_PATH);
        debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.authorization())
            .send()
            .await
            .with_context(|| format!("GET {} failed", SYSTEM_CONFIGURATION_PATH))?;
        if !response.status().is_success() {
            bail!("GET {} failed: {}", SYSTEM_CONFIGURATION_PATH, response.status());
        }
        response.json().await.with_context(|| {
            format!(
                "Could not read response of GET {}",
                SYSTEM_CONFIGURATION_PATH
            )
        })
    }

    /// Replace the full `ServerConfiguration` document.
    pub async fn post_configuration(&self, document: &Value) -> Result<()> {
        let url = self.url(SYSTEM_CONFIGURATION_PATH);
        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.authorization())
            .json(document)
            .send()
            .await
            .with_context(|| format!("POST {} failed", SYSTEM_CONFIGURATION_PATH))?;
        if !response.status().is_success() {
            bail!("POST {} failed: {}", SYSTEM_CONFIGURATION_PATH, response.status());
        }
        Ok(())
    }
}

#[async_trait]
impl SystemClient for JellyfinClient {
    async fn get_system(&self) -> Result<SystemState> {
        let document = self.get_configuration().await?;
        mapper::system_state_from_document(&document)
    }

    /// The server replaces its whole configuration on POST, so the partial
    /// update is merged into a freshly fetched document first.
    async fn update_system(&self, spec: &SystemSpec) -> Result<()> {
        let mut document = self.get_configuration().await?;
        mapper::apply_spec(&mut document, spec)?;
        self.post_configuration(&document).await
    }
}
