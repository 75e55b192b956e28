//! Milestone reconciliation: plan against a live snapshot, then apply.

use std::collections::{HashMap, HashSet};

use milesync_core::{Config, MilestoneSpec, RepoName};
use milesync_github::{Forge, LiveMilestone, RepoHandle};

use crate::error::{forge_err, SyncError};
use crate::outcome::{Change, Entity, Outcome};

/// One step of a milestone plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MilestoneAction<'a> {
    Create(&'a MilestoneSpec),
    Update {
        number: u64,
        spec: &'a MilestoneSpec,
    },
    Unchanged(&'a MilestoneSpec),
    /// Spec restricted to other repositories.
    Skipped(&'a MilestoneSpec),
    Delete(&'a LiveMilestone),
    DeletionExcluded(&'a LiveMilestone),
}

fn differs(live: &LiveMilestone, spec: &MilestoneSpec) -> bool {
    live.state != spec.state || live.description != spec.description
}

/// Compute the actions that bring `live` in line with `config` for `repo`.
///
/// Desired milestones come first, in config order, followed by deletions
/// in live order. Titles match exactly. A spec's `repos` restriction limits
/// where it is created or updated, but any same-titled spec still protects
/// a live milestone from deletion.
pub fn plan<'a>(
    config: &'a Config,
    repo: &RepoName,
    live: &'a [LiveMilestone],
) -> Vec<MilestoneAction<'a>> {
    let by_title: HashMap<&str, &LiveMilestone> =
        live.iter().map(|m| (m.title.as_str(), m)).collect();

    let mut actions = Vec::with_capacity(config.milestones.len());
    for spec in &config.milestones {
        if !spec.applies_to(repo) {
            actions.push(MilestoneAction::Skipped(spec));
            continue;
        }
        let action = match by_title.get(spec.title.as_str()) {
            Some(existing) if differs(existing, spec) => MilestoneAction::Update {
                number: existing.number,
                spec,
            },
            Some(_) => MilestoneAction::Unchanged(spec),
            None => MilestoneAction::Create(spec),
        };
        actions.push(action);
    }

    if config.delete_unknown_milestones {
        let desired: HashSet<&str> = config.milestones.iter().map(|m| m.title.as_str()).collect();
        for existing in live {
            if desired.contains(existing.title.as_str()) {
                continue;
            }
            if config.exclude_milestone_deletion.contains(&existing.title) {
                actions.push(MilestoneAction::DeletionExcluded(existing));
            } else {
                actions.push(MilestoneAction::Delete(existing));
            }
        }
    }

    actions
}

/// Issue the remote calls for `actions`; in dry-run mode only report them.
///
/// Stops at the first failed call.
pub fn apply(
    forge: &dyn Forge,
    repo: &RepoHandle,
    actions: &[MilestoneAction<'_>],
    dry_run: bool,
) -> Result<Vec<Outcome>, SyncError> {
    let repository = repo.full_name.as_str();
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let mut outcomes = Vec::with_capacity(actions.len());

    for action in actions {
        let outcome = match action {
            MilestoneAction::Create(spec) => {
                tracing::info!(repository, title = %spec.title, "{prefix}creating milestone");
                if !dry_run {
                    forge
                        .create_milestone(repo, spec)
                        .map_err(forge_err(repository, "create milestone"))?;
                }
                Outcome::new(Entity::Milestone, &spec.title, Change::Created, dry_run)
            }
            MilestoneAction::Update { number, spec } => {
                tracing::info!(
                    repository,
                    title = %spec.title,
                    state = %spec.state,
                    "{prefix}milestone differs, updating"
                );
                if !dry_run {
                    forge
                        .update_milestone(repo, *number, spec)
                        .map_err(forge_err(repository, "update milestone"))?;
                }
                Outcome::new(Entity::Milestone, &spec.title, Change::Updated, dry_run)
            }
            MilestoneAction::Unchanged(spec) => {
                tracing::debug!(repository, title = %spec.title, "milestone up to date");
                Outcome::new(Entity::Milestone, &spec.title, Change::Unchanged, dry_run)
            }
            MilestoneAction::Skipped(spec) => {
                tracing::debug!(repository, title = %spec.title, "milestone not for this repository");
                Outcome::new(Entity::Milestone, &spec.title, Change::Skipped, dry_run)
            }
            MilestoneAction::Delete(existing) => {
                tracing::info!(
                    repository,
                    title = %existing.title,
                    "{prefix}milestone no longer configured, deleting"
                );
                if !dry_run {
                    forge
                        .delete_milestone(repo, existing.number)
                        .map_err(forge_err(repository, "delete milestone"))?;
                }
                Outcome::new(Entity::Milestone, &existing.title, Change::Deleted, dry_run)
            }
            MilestoneAction::DeletionExcluded(existing) => {
                tracing::info!(
                    repository,
                    title = %existing.title,
                    "milestone is excluded from deletion, skipping"
                );
                Outcome::new(
                    Entity::Milestone,
                    &existing.title,
                    Change::DeletionExcluded,
                    dry_run,
                )
            }
        };
        outcomes.push(outcome);
    }

    Ok(outcomes)
}
