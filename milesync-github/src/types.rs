//! Live state as reported by the hosting API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use milesync_core::MilestoneState;

/// A resolved repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoHandle {
    pub id: u64,
    /// Canonical `owner/name`, as the API spells it.
    pub full_name: String,
}

/// A milestone currently present in a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveMilestone {
    /// Per-repository number; update and delete address milestones by it.
    pub number: u64,
    pub title: String,
    pub state: MilestoneState,
    /// Empty when the API reports `null`.
    pub description: String,
}

/// A label currently present in a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveLabel {
    pub name: String,
    pub color: String,
    /// Empty when the API reports `null`.
    pub description: String,
}

/// Remaining API quota for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: Option<DateTime<Utc>>,
}
