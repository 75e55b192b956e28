//! Error types for milesync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure while reading the config file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file did not exist at the resolved path.
    #[error("config file not found at {path}")]
    NotFound { path: PathBuf },

    /// JSON parse error on load — includes file path and line context from serde_json.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A repository identifier that is not of the form `owner/name`.
    #[error("invalid repository '{0}'; expected owner/name")]
    InvalidRepository(String),

    /// A milestone state other than `open` or `closed`.
    #[error("invalid state '{state}' for milestone '{title}'; expected open or closed")]
    InvalidState { title: String, state: String },

    /// A label color that is not six hex digits.
    #[error("invalid color '{color}' for label '{name}'; expected six hex digits")]
    InvalidColor { name: String, color: String },

    /// Two milestones in one config share a title.
    #[error("duplicate milestone title '{0}'")]
    DuplicateMilestone(String),

    /// Two labels in one config share a name.
    #[error("duplicate label name '{0}'")]
    DuplicateLabel(String),
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
