//! The collaborator API contract.
//!
//! The reconciler only ever talks to a `&dyn Forge`; [`crate::GitHubClient`]
//! is the production implementation and tests substitute an in-memory one.

use milesync_core::{LabelSpec, MilestoneSpec, RepoName};

use crate::error::ForgeError;
use crate::types::{LiveLabel, LiveMilestone, RateLimit, RepoHandle};

/// Read/create/update/delete access to a repository's milestones and labels.
///
/// Implementations return the *complete* live sets from the `list_*` calls;
/// pagination is their concern.
pub trait Forge {
    fn resolve_repository(&self, repo: &RepoName) -> Result<RepoHandle, ForgeError>;

    /// Every milestone, open and closed.
    fn list_milestones(&self, repo: &RepoHandle) -> Result<Vec<LiveMilestone>, ForgeError>;

    fn create_milestone(&self, repo: &RepoHandle, spec: &MilestoneSpec) -> Result<(), ForgeError>;

    /// Sets state and description of milestone `number` to those of `spec`.
    fn update_milestone(
        &self,
        repo: &RepoHandle,
        number: u64,
        spec: &MilestoneSpec,
    ) -> Result<(), ForgeError>;

    fn delete_milestone(&self, repo: &RepoHandle, number: u64) -> Result<(), ForgeError>;

    fn list_labels(&self, repo: &RepoHandle) -> Result<Vec<LiveLabel>, ForgeError>;

    fn create_label(&self, repo: &RepoHandle, spec: &LabelSpec) -> Result<(), ForgeError>;

    /// Rewrites label `current_name` with name, color and description of `spec`.
    fn update_label(
        &self,
        repo: &RepoHandle,
        current_name: &str,
        spec: &LabelSpec,
    ) -> Result<(), ForgeError>;

    fn delete_label(&self, repo: &RepoHandle, name: &str) -> Result<(), ForgeError>;

    fn rate_limit(&self) -> Result<RateLimit, ForgeError>;
}
