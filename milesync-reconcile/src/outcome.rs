//! Per-entity results of applying a plan.

use std::fmt;

/// Which kind of entity an [`Outcome`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Milestone,
    Label,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Milestone => f.write_str("milestone"),
            Entity::Label => f.write_str("label"),
        }
    }
}

/// What happened (or, in dry-run mode, would have happened) to one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Created,
    Updated,
    Deleted,
    /// Live entity already matches the desired one.
    Unchanged,
    /// Desired entity is restricted to other repositories.
    Skipped,
    /// Unknown live entity kept because its key is excluded from deletion.
    DeletionExcluded,
}

impl Change {
    /// `true` for the changes that issue a remote call.
    pub fn is_mutation(self) -> bool {
        matches!(self, Change::Created | Change::Updated | Change::Deleted)
    }
}

/// Outcome of reconciling a single milestone or label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub entity: Entity,
    /// Milestone title or label name.
    pub key: String,
    pub change: Change,
    /// Mutation was planned but not sent.
    pub dry_run: bool,
}

impl Outcome {
    pub(crate) fn new(entity: Entity, key: &str, change: Change, dry_run: bool) -> Self {
        Self {
            entity,
            key: key.to_string(),
            change,
            // Only mutations can be withheld.
            dry_run: dry_run && change.is_mutation(),
        }
    }
}

/// Counts of each [`Change`] across a set of outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub excluded: usize,
}

impl Tally {
    pub fn of<'a>(outcomes: impl IntoIterator<Item = &'a Outcome>) -> Self {
        let mut tally = Tally::default();
        for outcome in outcomes {
            match outcome.change {
                Change::Created => tally.created += 1,
                Change::Updated => tally.updated += 1,
                Change::Deleted => tally.deleted += 1,
                Change::Unchanged => tally.unchanged += 1,
                Change::Skipped => tally.skipped += 1,
                Change::DeletionExcluded => tally.excluded += 1,
            }
        }
        tally
    }

    pub fn mutations(&self) -> usize {
        self.created + self.updated + self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_flag_only_sticks_to_mutations() {
        let created = Outcome::new(Entity::Label, "bug", Change::Created, true);
        let unchanged = Outcome::new(Entity::Label, "bug", Change::Unchanged, true);
        assert!(created.dry_run);
        assert!(!unchanged.dry_run);
    }

    #[test]
    fn tally_counts_each_change() {
        let outcomes = [
            Outcome::new(Entity::Milestone, "a", Change::Created, false),
            Outcome::new(Entity::Milestone, "b", Change::Updated, false),
            Outcome::new(Entity::Milestone, "c", Change::Unchanged, false),
            Outcome::new(Entity::Milestone, "d", Change::DeletionExcluded, false),
            Outcome::new(Entity::Label, "e", Change::Deleted, false),
        ];
        let tally = Tally::of(&outcomes);
        assert_eq!(tally.created, 1);
        assert_eq!(tally.updated, 1);
        assert_eq!(tally.deleted, 1);
        assert_eq!(tally.unchanged, 1);
        assert_eq!(tally.excluded, 1);
        assert_eq!(tally.mutations(), 3);
    }
}
