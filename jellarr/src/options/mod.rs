use std::io::IsTerminal as _;

use anyhow::{bail, Result};
use clap::{ColorChoice, Parser};

#[derive(Parser, Debug, Clone)]
pub struct Options {
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[arg(long, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

impl Options {
    /// Whether log output on stderr should use ANSI colors.
    pub fn use_color(&self) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stderr().is_terminal(),
        }
    }
}

/// Credentials for the Jellyfin API.
#[derive(Parser, Debug, Clone)]
pub struct ApiKeyArgs {
    /// Jellyfin API key
    #[arg(long, env = "JELLARR_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl ApiKeyArgs {
    pub fn require(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => bail!("set JELLARR_API_KEY"),
        }
    }
}
