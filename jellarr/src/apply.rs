use std::path::PathBuf;

use anyhow::Result;
use jellarr_client::JellyfinClient;
use jellarr_core::{config, Outcome, Reconciler, SystemClient, SystemSpec};

use crate::{application, options::ApiKeyArgs};

#[derive(clap::Parser, Debug)]
pub(crate) struct Args {
    /// Path to the config file
    #[arg(long, alias = "configFile", default_value = "config/config.yml")]
    config_file: PathBuf,

    /// Only report what would change; do not update the server
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    api_key: ApiKeyArgs,
}

/// What `apply` did, or would have done with `--dry-run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Report {
    Applied(Outcome),
    Planned { changed_fields: Vec<&'static str> },
}

/// Run the `apply` command.
pub(crate) fn apply(args: &Args) -> Result<()> {
    let config = config::load(&args.config_file)?;
    let api_key = args.api_key.require()?;
    let client = JellyfinClient::new(config.base_url.as_str(), api_key)?;

    let report = application::block_on(run(client, &config.system, args.dry_run))??;

    match report {
        Report::Planned { changed_fields } if changed_fields.is_empty() => {
            eprintln!("Nothing to apply; system config is up to date.");
        }
        Report::Planned { changed_fields } => {
            eprintln!("The following system settings would be updated:");
            for field in changed_fields {
                eprintln!("  - {}", field);
            }
        }
        Report::Applied(_) => {
            println!("jellarr apply complete");
        }
    }
    Ok(())
}

pub(crate) async fn run(
    client: impl SystemClient,
    system: &SystemSpec,
    dry_run: bool,
) -> Result<Report> {
    let reconciler = Reconciler::new(client);
    if dry_run {
        let diff = reconciler.plan(system).await?;
        Ok(Report::Planned {
            changed_fields: diff.changed_fields(),
        })
    } else {
        Ok(Report::Applied(reconciler.reconcile(system).await?))
    }
}
