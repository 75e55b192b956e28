//! Run driver: every config, every repository, milestones then labels.
//!
//! Strictly sequential. The first failed remote call aborts the run;
//! repositories already processed stay reconciled.

use milesync_core::{Config, RepoName};
use milesync_github::{Forge, RateLimit};

use crate::error::{forge_err, SyncError};
use crate::outcome::{Outcome, Tally};
use crate::{labels, milestones};

/// Options for a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Plan and report, but issue no mutating call.
    pub dry_run: bool,
}

/// Result of reconciling one repository under one config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoReport {
    pub repository: RepoName,
    /// `None` when the repository is excluded from milestone sync.
    pub milestones: Option<Vec<Outcome>>,
    /// `None` when the repository is excluded from label sync.
    pub labels: Option<Vec<Outcome>>,
}

impl RepoReport {
    pub fn milestone_tally(&self) -> Tally {
        Tally::of(self.milestones.iter().flatten())
    }

    pub fn label_tally(&self) -> Tally {
        Tally::of(self.labels.iter().flatten())
    }

    /// Outcomes of both phases, milestones first.
    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.milestones.iter().flatten().chain(self.labels.iter().flatten())
    }
}

/// Result of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub repositories: Vec<RepoReport>,
    pub rate_limit: RateLimit,
    pub dry_run: bool,
}

impl RunSummary {
    pub fn tally(&self) -> Tally {
        Tally::of(self.repositories.iter().flat_map(RepoReport::outcomes))
    }
}

/// Reconcile every repository of every config, in order.
pub fn run(
    forge: &dyn Forge,
    configs: &[Config],
    options: RunOptions,
) -> Result<RunSummary, SyncError> {
    let mut repositories = Vec::new();
    for config in configs {
        for repo in &config.repositories {
            repositories.push(sync_repository(forge, config, repo, options)?);
        }
    }

    let rate_limit = forge
        .rate_limit()
        .map_err(forge_err("session", "fetch rate limit"))?;
    tracing::info!("finished");

    Ok(RunSummary {
        repositories,
        rate_limit,
        dry_run: options.dry_run,
    })
}

/// Reconcile milestones, then labels, of a single repository.
pub fn sync_repository(
    forge: &dyn Forge,
    config: &Config,
    repo: &RepoName,
    options: RunOptions,
) -> Result<RepoReport, SyncError> {
    let handle = forge
        .resolve_repository(repo)
        .map_err(forge_err(repo, "resolve repository"))?;

    tracing::info!(repository = %repo, "milestones");
    let milestone_outcomes = if config.syncs_milestones(repo) {
        let live = forge
            .list_milestones(&handle)
            .map_err(forge_err(repo, "list milestones"))?;
        let plan = milestones::plan(config, repo, &live);
        Some(milestones::apply(forge, &handle, &plan, options.dry_run)?)
    } else {
        tracing::info!(repository = %repo, "repository is excluded from milestone sync");
        None
    };

    tracing::info!(repository = %repo, "labels");
    let label_outcomes = if config.syncs_labels(repo) {
        let live = forge
            .list_labels(&handle)
            .map_err(forge_err(repo, "list labels"))?;
        let plan = labels::plan(config, repo, &live);
        Some(labels::apply(forge, &handle, &plan, options.dry_run)?)
    } else {
        tracing::info!(repository = %repo, "repository is excluded from label sync");
        None
    };

    Ok(RepoReport {
        repository: repo.clone(),
        milestones: milestone_outcomes,
        labels: label_outcomes,
    })
}
