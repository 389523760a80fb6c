//! Crash-recovery cleanup of partial transfers.
//!
//! A run that is killed mid-transfer leaves `<name>.savetv_temp` behind in
//! the working directory. The next run deletes those files before doing
//! anything else.

use std::io;
use std::path::Path;

use tracing::{info, instrument};

use super::filename::is_temp_file;

/// Deletes every in-progress file directly inside `dir`.
///
/// The scan is not recursive and only regular files are removed.
/// Returns the number of files deleted.
///
/// # Errors
///
/// Returns the IO error if the directory cannot be read or a leftover
/// file cannot be deleted.
#[instrument(fields(dir = %dir.display()))]
pub async fn purge_partial_downloads(dir: &Path) -> io::Result<usize> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut removed = 0;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_temp_file(&path) || !entry.file_type().await?.is_file() {
            continue;
        }
        info!(file = %path.display(), "Removing old tempfile");
        tokio::fs::remove_file(&path).await?;
        removed += 1;
    }

    Ok(removed)
}
