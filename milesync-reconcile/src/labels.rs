//! Label reconciliation. Mirrors [`crate::milestones`], compared on color
//! and description.

use std::collections::{HashMap, HashSet};

use milesync_core::{Config, LabelSpec, RepoName};
use milesync_github::{Forge, LiveLabel, RepoHandle};

use crate::error::{forge_err, SyncError};
use crate::outcome::{Change, Entity, Outcome};

/// One step of a label plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelAction<'a> {
    Create(&'a LabelSpec),
    /// `current` is the live name the update is addressed to.
    Update {
        current: &'a str,
        spec: &'a LabelSpec,
    },
    Unchanged(&'a LabelSpec),
    Skipped(&'a LabelSpec),
    Delete(&'a LiveLabel),
    DeletionExcluded(&'a LiveLabel),
}

fn differs(live: &LiveLabel, spec: &LabelSpec) -> bool {
    live.color != spec.color || live.description != spec.description
}

/// Compute the actions that bring `live` in line with `config` for `repo`.
pub fn plan<'a>(config: &'a Config, repo: &RepoName, live: &'a [LiveLabel]) -> Vec<LabelAction<'a>> {
    let by_name: HashMap<&str, &LiveLabel> = live.iter().map(|l| (l.name.as_str(), l)).collect();

    let mut actions = Vec::with_capacity(config.labels.len());
    for spec in &config.labels {
        if !spec.applies_to(repo) {
            actions.push(LabelAction::Skipped(spec));
            continue;
        }
        let action = match by_name.get(spec.name.as_str()) {
            Some(existing) if differs(existing, spec) => LabelAction::Update {
                current: existing.name.as_str(),
                spec,
            },
            Some(_) => LabelAction::Unchanged(spec),
            None => LabelAction::Create(spec),
        };
        actions.push(action);
    }

    if config.delete_unknown_labels {
        // Restriction lists are ignored here: any same-named spec keeps the label.
        let desired: HashSet<&str> = config.labels.iter().map(|l| l.name.as_str()).collect();
        for existing in live {
            if desired.contains(existing.name.as_str()) {
                continue;
            }
            if config.exclude_label_deletion.contains(&existing.name) {
                actions.push(LabelAction::DeletionExcluded(existing));
            } else {
                actions.push(LabelAction::Delete(existing));
            }
        }
    }

    actions
}

/// Issue the remote calls for `actions`; in dry-run mode only report them.
pub fn apply(
    forge: &dyn Forge,
    repo: &RepoHandle,
    actions: &[LabelAction<'_>],
    dry_run: bool,
) -> Result<Vec<Outcome>, SyncError> {
    let repository = repo.full_name.as_str();
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let mut outcomes = Vec::with_capacity(actions.len());

    for action in actions {
        let (key, change) = match action {
            LabelAction::Create(spec) => {
                tracing::info!(repository, name = %spec.name, color = %spec.color, "{prefix}creating label");
                if !dry_run {
                    forge
                        .create_label(repo, spec)
                        .map_err(forge_err(repository, "create label"))?;
                }
                (spec.name.as_str(), Change::Created)
            }
            LabelAction::Update { current, spec } => {
                tracing::info!(repository, name = %spec.name, color = %spec.color, "{prefix}label differs, updating");
                if !dry_run {
                    forge
                        .update_label(repo, current, spec)
                        .map_err(forge_err(repository, "update label"))?;
                }
                (spec.name.as_str(), Change::Updated)
            }
            LabelAction::Unchanged(spec) => {
                tracing::debug!(repository, name = %spec.name, "label up to date");
                (spec.name.as_str(), Change::Unchanged)
            }
            LabelAction::Skipped(spec) => {
                tracing::debug!(repository, name = %spec.name, "label not for this repository");
                (spec.name.as_str(), Change::Skipped)
            }
            LabelAction::Delete(existing) => {
                tracing::info!(repository, name = %existing.name, "{prefix}label no longer configured, deleting");
                if !dry_run {
                    forge
                        .delete_label(repo, &existing.name)
                        .map_err(forge_err(repository, "delete label"))?;
                }
                (existing.name.as_str(), Change::Deleted)
            }
            LabelAction::DeletionExcluded(existing) => {
                tracing::info!(repository, name = %existing.name, "label is excluded from deletion, skipping");
                (existing.name.as_str(), Change::DeletionExcluded)
            }
        };
        outcomes.push(Outcome::new(Entity::Label, key, change, dry_run));
    }

    Ok(outcomes)
}
