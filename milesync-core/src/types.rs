//! Domain types for the desired state.
//!
//! Every type here is built by [`crate::config`] from the raw JSON document
//! and is read-only for the duration of a run.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A repository identifier of the form `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoName(String);

impl RepoName {
    /// The `owner` half of `owner/name`.
    pub fn owner(&self) -> &str {
        self.split().0
    }

    /// The `name` half of `owner/name`.
    pub fn name(&self) -> &str {
        self.split().1
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn split(&self) -> (&str, &str) {
        // Validated on construction.
        self.0.split_once('/').unwrap_or((self.0.as_str(), ""))
    }
}

impl FromStr for RepoName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self(s.to_owned()))
            }
            _ => Err(ConfigError::InvalidRepository(s.to_owned())),
        }
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Open/closed state of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MilestoneState {
    #[default]
    Open,
    Closed,
}

impl MilestoneState {
    /// Wire form used by the hosting API.
    pub fn as_str(self) -> &'static str {
        match self {
            MilestoneState::Open => "open",
            MilestoneState::Closed => "closed",
        }
    }

    /// Case-insensitive parse; `None` for anything but open/closed.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Some(MilestoneState::Open),
            "closed" => Some(MilestoneState::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for MilestoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Desired entities
// ---------------------------------------------------------------------------

/// A desired milestone. `title` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneSpec {
    pub title: String,
    pub state: MilestoneState,
    pub description: String,
    /// Restricts the milestone to these repositories when non-empty.
    pub repos: Vec<RepoName>,
}

impl MilestoneSpec {
    pub fn applies_to(&self, repo: &RepoName) -> bool {
        self.repos.is_empty() || self.repos.contains(repo)
    }
}

/// A desired label. `name` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpec {
    pub name: String,
    /// Six lower-case hex digits, no leading `#`.
    pub color: String,
    pub description: String,
    /// Restricts the label to these repositories when non-empty.
    pub repos: Vec<RepoName>,
}

impl LabelSpec {
    pub fn applies_to(&self, repo: &RepoName) -> bool {
        self.repos.is_empty() || self.repos.contains(repo)
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// One top-level configuration entry.
///
/// All optional fields of the JSON document default to empty sets or `false`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub repositories: Vec<RepoName>,
    pub milestones: Vec<MilestoneSpec>,
    pub labels: Vec<LabelSpec>,
    pub exclude_from_milestone_sync: HashSet<RepoName>,
    pub exclude_from_label_sync: HashSet<RepoName>,
    pub exclude_milestone_deletion: HashSet<String>,
    pub exclude_label_deletion: HashSet<String>,
    pub delete_unknown_milestones: bool,
    pub delete_unknown_labels: bool,
}

impl Config {
    pub fn syncs_milestones(&self, repo: &RepoName) -> bool {
        !self.exclude_from_milestone_sync.contains(repo)
    }

    pub fn syncs_labels(&self, repo: &RepoName) -> bool {
        !self.exclude_from_label_sync.contains(repo)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
