//! `milesync validate` — load the config and report what it declares.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use milesync_core::config;

/// Arguments for `milesync validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the JSON config file.
    #[arg(long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

impl ValidateArgs {
    pub fn run(self) -> Result<()> {
        let path = config::resolve_path(self.config.as_deref());
        let configs = config::load_at(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?;

        for (i, c) in configs.iter().enumerate() {
            println!(
                "config #{}: {} repositories, {} milestones, {} labels",
                i + 1,
                c.repositories.len(),
                c.milestones.len(),
                c.labels.len(),
            );
        }
        println!("✓ {} is valid ({} configs)", path.display(), configs.len());
        Ok(())
    }
}
