//! Error types for milesync-reconcile.

use thiserror::Error;

use milesync_github::ForgeError;

/// All errors that can abort a reconciliation run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A remote call failed, annotated with where it happened.
    #[error("{operation} failed for {repository}: {source}")]
    Forge {
        repository: String,
        operation: &'static str,
        #[source]
        source: ForgeError,
    },
}

/// Build a `map_err` adapter producing [`SyncError::Forge`].
pub(crate) fn forge_err(
    repository: impl std::fmt::Display,
    operation: &'static str,
) -> impl FnOnce(ForgeError) -> SyncError {
    let repository = repository.to_string();
    move |source| SyncError::Forge {
        repository,
        operation,
        source,
    }
}
