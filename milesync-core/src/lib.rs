//! milesync core library — desired-state types, config loading, errors.
//!
//! - [`types`] — repository names, milestone/label specs, [`Config`]
//! - [`config`] — resolve / load / validate the JSON config file
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use error::ConfigError;
pub use types::{Config, LabelSpec, MilestoneSpec, MilestoneState, RepoName};
