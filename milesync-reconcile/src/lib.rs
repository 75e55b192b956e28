//! # milesync-reconcile
//!
//! Diff-and-apply reconciliation of milestones and labels.
//!
//! Call [`pipeline::run`] to reconcile every repository of every config, or
//! [`pipeline::sync_repository`] for a single one. [`milestones`] and
//! [`labels`] expose the pure `plan` step and the `apply` step separately.

pub mod error;
pub mod labels;
pub mod milestones;
pub mod outcome;
pub mod pipeline;

pub use error::SyncError;
pub use outcome::{Change, Entity, Outcome, Tally};
pub use pipeline::{run, sync_repository, RepoReport, RunOptions, RunSummary};
