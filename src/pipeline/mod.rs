//! Archive pipeline: cleanup, login, listing, then one recording at a time.
//!
//! Recordings are processed strictly sequentially so that slow transfers
//! never compete for bandwidth. A failure of one recording is logged and the
//! next one is attempted; only cleanup, login and listing abort the run.
//!
//! Per recording the order is fixed:
//! ledger lookup → url resolution → transfer → ledger insert → remote delete.
//! A crash between transfer and ledger insert leads to a re-download on the
//! next run, never to a recording marked done without a saved file.

mod error;

pub use error::{ItemError, PipelineError};

use std::fmt;
use std::path::PathBuf;

use tracing::{error, info, instrument, warn};

use crate::api::{CatalogItem, SaveTvApi, Session};
use crate::download::{VideoFetcher, purge_partial_downloads};
use crate::ledger::CompletionLedger;

/// Account credentials for the login step.
#[derive(Clone)]
pub struct Credentials {
    /// Account name.
    pub user: String,
    /// Account password (never logged).
    pub password: String,
}

impl Credentials {
    /// Creates credentials.
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What happened to one recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Saved to `path`; `removed` tells whether the remote copy was deleted.
    Downloaded {
        /// Final local path.
        path: PathBuf,
        /// Whether the recording was deleted online.
        removed: bool,
    },
    /// Found in the ledger, nothing to do.
    AlreadyDownloaded,
    /// Only encodings with ads exist, skipped.
    NoAdFreeQuality,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Recordings in the listing.
    pub total: usize,
    /// Recordings saved in this run.
    pub downloaded: usize,
    /// Recordings skipped because the ledger already had them.
    pub already_downloaded: usize,
    /// Recordings skipped for lack of an ad-free encoding.
    pub no_ad_free: usize,
    /// Recordings deleted online after saving.
    pub removed: usize,
    /// Recordings that failed at some stage.
    pub failed: usize,
    /// Temp files purged by crash-recovery cleanup.
    pub purged_temp_files: usize,
}

impl RunSummary {
    fn tally(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Downloaded { removed, .. } => {
                self.downloaded += 1;
                if *removed {
                    self.removed += 1;
                }
            }
            ItemOutcome::AlreadyDownloaded => self.already_downloaded += 1,
            ItemOutcome::NoAdFreeQuality => self.no_ad_free += 1,
        }
    }
}

/// Sequences the archive run over its collaborators.
pub struct Pipeline<'a> {
    api: &'a dyn SaveTvApi,
    fetcher: &'a dyn VideoFetcher,
    ledger: &'a dyn CompletionLedger,
    work_dir: PathBuf,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline. `work_dir` is scanned for leftover temp files.
    pub fn new(
        api: &'a dyn SaveTvApi,
        fetcher: &'a dyn VideoFetcher,
        ledger: &'a dyn CompletionLedger,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            api,
            fetcher,
            ledger,
            work_dir: work_dir.into(),
        }
    }

    /// Runs cleanup, login and listing, then processes every recording in
    /// listing order.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if cleanup, login or listing fails. Failures
    /// of individual recordings are logged and counted in the summary.
    #[instrument(skip(self, credentials), fields(user = %credentials.user))]
    pub async fn run(&self, credentials: &Credentials) -> Result<RunSummary, PipelineError> {
        let purged = purge_partial_downloads(&self.work_dir)
            .await
            .map_err(PipelineError::Cleanup)?;

        let session = self
            .api
            .login(&credentials.user, &credentials.password)
            .await?;
        info!("Login successful");

        let items = self.api.list_recordings(&session).await?;
        info!(count = items.len(), "Recordings in your collection");

        let mut summary = RunSummary {
            total: items.len(),
            purged_temp_files: purged,
            ..RunSummary::default()
        };

        for (index, item) in items.iter().enumerate() {
            info!(
                "[Video {}/{}, ID {}]: {}",
                index + 1,
                items.len(),
                item.id,
                item.display_name
            );
            match self.process_item(&session, item).await {
                Ok(outcome) => summary.tally(&outcome),
                Err(e) => {
                    error!(id = %item.id, error = %e, "Recording failed, skipping");
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Handles one recording: skip if recorded or without ad-free encoding,
    /// otherwise resolve, download, record, and optionally delete online.
    ///
    /// # Errors
    ///
    /// Returns the [`ItemError`] of the first stage that failed. Remote
    /// deletion is never attempted unless the ledger insert succeeded.
    pub async fn process_item(
        &self,
        session: &Session,
        item: &CatalogItem,
    ) -> Result<ItemOutcome, ItemError> {
        if self.ledger.has(&item.id).await? {
            info!(id = %item.id, "Video was already downloaded");
            return Ok(ItemOutcome::AlreadyDownloaded);
        }

        let Some(quality) = item.quality else {
            warn!(id = %item.id, "No ad-free download available, skipping");
            return Ok(ItemOutcome::NoAdFreeQuality);
        };
        info!(id = %item.id, quality = %quality, "Video is new, starting download");

        let url = self.api.resolve_download_url(session, item).await?;
        let path = self.fetcher.fetch(&url).await?;
        info!(id = %item.id, path = %path.display(), "Download complete");

        self.ledger
            .record(&item.id, &item.display_name, &path)
            .await?;

        let removed = self.api.remove_recording(session, &item.id).await?;
        if removed {
            info!(id = %item.id, "Removed video from online collection");
        }

        Ok(ItemOutcome::Downloaded { path, removed })
    }
}
