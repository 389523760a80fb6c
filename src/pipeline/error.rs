//! Error types for the archive pipeline.

use thiserror::Error;

use crate::api::{AuthError, ListError, RemoveError, ResolveError};
use crate::download::DownloadError;
use crate::ledger::LedgerError;

/// Failures that abort the whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Leftover temp files could not be purged.
    #[error("crash-recovery cleanup failed: {0}")]
    Cleanup(#[source] std::io::Error),

    /// Login failed.
    #[error("login failed: {0}")]
    Auth(#[from] AuthError),

    /// The archive could not be listed.
    #[error("listing recordings failed: {0}")]
    List(#[from] ListError),
}

/// Failures of a single recording. The run continues with the next one.
#[derive(Debug, Error)]
pub enum ItemError {
    /// Ledger lookup or insert failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// No download url could be obtained.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The transfer failed.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// The video was saved and recorded, but remote deletion failed.
    #[error("saved locally but remote deletion failed: {0}")]
    Remove(#[from] RemoveError),
}
