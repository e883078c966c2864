mod application;
mod apply;
mod dump;
mod logging;
mod options;

use anyhow::Result;
use application::handle_result;
use clap::{CommandFactory as _, Parser, Subcommand};
use options::Options;

fn main() {
    let args = Args::parse();
    handle_result(run_args(args));
}

fn run_args(args: Args) -> Result<()> {
    match &args.command {
        Commands::Apply(subargs) => with_logging(&args.options, || apply::apply(subargs)),
        Commands::Dump(subargs) => with_logging(&args.options, || dump::dump(subargs)),
        Commands::GenerateMan => (|| {
            let cmd = Args::command();
            let man = clap_mangen::Man::new(cmd);
            let mut buffer: Vec<u8> = Default::default();
            man.render(&mut buffer)?;
            println!("{}", String::from_utf8(buffer)?);
            Ok(())
        })(),
        Commands::GenerateMarkdown => {
            let opts = clap_markdown::MarkdownOptions::new().show_footer(false);
            let markdown: String = clap_markdown::help_markdown_custom::<Args>(&opts);
            println!("{}", markdown);
            Ok(())
        }
        Commands::GenerateCompletion { shell } => {
            let mut cmd = Args::command();
            clap_complete::generate(*shell, &mut cmd, "jellarr", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn with_logging(options: &Options, f: impl FnOnce() -> Result<()>) -> Result<()> {
    logging::set_up(&logging::Options {
        verbose: options.verbose,
        color: options.use_color(),
    })?;
    f()
}

/// jellarr: declarative Jellyfin configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    options: Options,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Update the server so that its configuration matches the config file
    #[command()]
    Apply(apply::Args),

    /// Print the server's current configuration as a config file
    #[command()]
    Dump(dump::Args),

    /// Generate markdown documentation for jellarr
    #[command(hide = true)]
    GenerateMarkdown,

    /// Generate a manpage for jellarr
    #[command(hide = true)]
    GenerateMan,

    /// Generate shell completion for jellarr
    #[command(hide = true)]
    GenerateCompletion {
        /// The shell to generate completion for
        #[arg(long)]
        shell: clap_complete::Shell,
    },
}
