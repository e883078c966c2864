use anyhow::{Context, Result};
use jellarr_client::JellyfinClient;
use jellarr_core::{RootConfig, SystemClient};

use crate::{application, options::ApiKeyArgs};

#[derive(clap::Parser, Debug)]
pub(crate) struct Args {
    /// Base URL of the Jellyfin server, e.g. http://localhost:8096
    #[arg(long)]
    base_url: String,

    #[command(flatten)]
    api_key: ApiKeyArgs,
}

/// Run the `dump` command: print the live system configuration as a config file.
pub(crate) fn dump(args: &Args) -> Result<()> {
    let api_key = args.api_key.require()?;
    let client = JellyfinClient::new(args.base_url.as_str(), api_key)?;
    let yaml = application::block_on(render(&client, &args.base_url))??;
    print!("{}", yaml);
    Ok(())
}

pub(crate) async fn render(client: impl SystemClient, base_url: &str) -> Result<String> {
    let state = client.get_system().await.context("get system")?;
    RootConfig::from_state(base_url, &state).to_yaml()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jellarr_core::{config, PluginRepository, SystemSpec, SystemState, TrickplayOptions};

    struct StaticClient(SystemState);

    #[async_trait]
    impl SystemClient for StaticClient {
        async fn get_system(&self) -> Result<SystemState> {
            Ok(self.0.clone())
        }

        async fn update_system(&self, _spec: &SystemSpec) -> Result<()> {
            panic!("dump must not update");
        }
    }

    #[tokio::test]
    async fn test_dump_is_a_loadable_config() {
        let state = SystemState {
            enable_metrics: true,
            plugin_repositories: vec![PluginRepository::new(
                "Jellyfin Stable",
                "https://repo.jellyfin.org/manifest.json",
                true,
            )],
            trickplay_options: TrickplayOptions {
                enable_hw_acceleration: true,
                enable_hw_encoding: false,
            },
        };

        let yaml = render(StaticClient(state.clone()), "http://localhost:8096")
            .await
            .unwrap();

        assert!(yaml.contains("http://localhost:8096"));
        assert!(yaml.contains("enableHwAcceleration: true"));
        assert!(yaml.contains("enableHwEncoding: false"));
        let config = config::parse(&yaml).unwrap();
        assert_eq!(config.system, state.to_spec());
    }
}
