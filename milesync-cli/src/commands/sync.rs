//! `milesync sync` — reconcile every configured repository.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use milesync_core::config;
use milesync_github::GitHubClient;
use milesync_reconcile::{pipeline, RunOptions};

use super::report;

/// Arguments for `milesync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the JSON config file.
    #[arg(long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Show what would change without calling any mutating endpoint.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let path = config::resolve_path(self.config.as_deref());
        let configs = config::load_at(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?;

        let client = GitHubClient::from_env().context("cannot create GitHub client")?;
        let options = RunOptions {
            dry_run: self.dry_run,
        };
        let summary = pipeline::run(&client, &configs, options).context("sync failed")?;

        report::print_summary(&summary);
        Ok(())
    }
}
