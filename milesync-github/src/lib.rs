//! # milesync-github
//!
//! The collaborator API seen by the reconciler: the [`Forge`] trait, the
//! live-state types it returns, and [`GitHubClient`], a blocking REST
//! implementation built on `ureq`.

pub mod client;
pub mod error;
pub mod forge;
pub mod types;

pub use client::GitHubClient;
pub use error::ForgeError;
pub use forge::Forge;
pub use types::{LiveLabel, LiveMilestone, RateLimit, RepoHandle};
