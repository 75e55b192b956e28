//! milesync — reconcile GitHub milestones and labels against a config file.
//!
//! # Usage
//!
//! ```text
//! milesync sync [--config <path>] [--dry-run] [--verbose]
//! milesync validate [--config <path>]
//! ```
//!
//! The config path defaults to `$CONFIG_FILE`, then `config.json`. `sync`
//! reads the access token from `$GITHUB_TOKEN`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{sync::SyncArgs, validate::ValidateArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "milesync",
    version,
    about = "Keep milestones and labels in sync across GitHub repositories",
    long_about = None,
)]
struct Cli {
    /// Log every decision, not only changes (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create, update and delete milestones and labels to match the config.
    Sync(SyncArgs),

    /// Load and validate the config without contacting GitHub.
    Validate(ValidateArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Validate(args) => args.run(),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stdout)
        .try_init();
}
