//! Completion ledger: the persistent set of telecasts already saved to disk.
//!
//! The ledger is the only state that outlives a run. An entry means "never
//! download again", whether or not the file still exists locally.
//!
//! # Example
//!
//! ```ignore
//! use savetv_core::ledger::Ledger;
//! use savetv_core::api::TelecastId;
//!
//! let ledger = Ledger::open(Path::new("savetv-dl.db")).await?;
//! let id = TelecastId::new("12345");
//! if !ledger.has(&id).await? {
//!     // ... download ...
//!     ledger.insert(&id, Some("Tatort"), Some(&saved_path)).await?;
//! }
//! ```

mod error;

pub use error::LedgerError;

use std::path::Path;

use async_trait::async_trait;
use sqlx::Row;
use tracing::instrument;

use crate::api::TelecastId;
use crate::db::Database;

/// Idempotency store the pipeline consults before and after each download.
#[async_trait]
pub trait CompletionLedger: Send + Sync {
    /// Whether `id` was recorded by this or an earlier run.
    async fn has(&self, id: &TelecastId) -> Result<bool, LedgerError>;

    /// Records `id` as downloaded. Recording an id twice is not an error.
    async fn record(
        &self,
        id: &TelecastId,
        display_name: &str,
        saved_path: &Path,
    ) -> Result<(), LedgerError>;
}

/// SQLite-backed ledger.
#[derive(Debug, Clone)]
pub struct Ledger {
    db: Database,
}

impl Ledger {
    /// Creates a ledger on an already opened database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Opens (creating if needed) the ledger database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Open`] if the database cannot be opened or migrated.
    pub async fn open(path: &Path) -> Result<Self, LedgerError> {
        Ok(Self::new(Database::open(path).await?))
    }

    /// Whether `id` has been recorded.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] if the query fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn has(&self, id: &TelecastId) -> Result<bool, LedgerError> {
        let row = sqlx::query(r"SELECT COUNT(*) AS count FROM finished_downloads WHERE telecast_id = ?")
            .bind(id.as_str())
            .fetch_one(self.db.pool())
            .await?;

        Ok(row.get::<i64, _>("count") > 0)
    }

    /// Inserts `id` with optional metadata about the saved file.
    ///
    /// An existing entry is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] if the insert fails.
    #[instrument(skip(self, saved_path), fields(id = %id))]
    pub async fn insert(
        &self,
        id: &TelecastId,
        display_name: Option<&str>,
        saved_path: Option<&Path>,
    ) -> Result<(), LedgerError> {
        let saved_path = saved_path.map(|p| p.to_string_lossy().into_owned());
        sqlx::query(
            r"INSERT INTO finished_downloads (telecast_id, display_name, saved_path)
              VALUES (?, ?, ?)
              ON CONFLICT(telecast_id) DO NOTHING",
        )
        .bind(id.as_str())
        .bind(display_name)
        .bind(saved_path)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// Number of recorded telecasts.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Database`] if the query fails.
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<i64, LedgerError> {
        let row = sqlx::query(r"SELECT COUNT(*) AS count FROM finished_downloads")
            .fetch_one(self.db.pool())
            .await?;

        Ok(row.get("count"))
    }

    /// Closes the underlying database.
    pub async fn close(self) {
        self.db.close().await;
    }
}

#[async_trait]
impl CompletionLedger for Ledger {
    async fn has(&self, id: &TelecastId) -> Result<bool, LedgerError> {
        Ledger::has(self, id).await
    }

    async fn record(
        &self,
        id: &TelecastId,
        display_name: &str,
        saved_path: &Path,
    ) -> Result<(), LedgerError> {
        self.insert(id, Some(display_name), Some(saved_path)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn in_memory() -> Ledger {
        Ledger::new(Database::open_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_record_then_has() {
        let ledger = in_memory().await;
        let id = TelecastId::new("12345");

        ledger.insert(&id, Some("Tatort"), None).await.unwrap();

        assert!(ledger.has(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_unrecorded_id_is_absent() {
        let ledger = in_memory().await;
        ledger
            .insert(&TelecastId::new("1"), None, None)
            .await
            .unwrap();

        assert!(!ledger.has(&TelecastId::new("2")).await.unwrap());
    }

    #[tokio::test]
    async fn test_record_twice_is_idempotent() {
        let ledger = in_memory().await;
        let id = TelecastId::new("42");

        ledger.insert(&id, Some("first"), None).await.unwrap();
        ledger.insert(&id, Some("second"), None).await.unwrap();

        assert_eq!(ledger.count().await.unwrap(), 1);
        let name: (Option<String>,) =
            sqlx::query_as("SELECT display_name FROM finished_downloads WHERE telecast_id = '42'")
                .fetch_one(ledger.db.pool())
                .await
                .unwrap();
        assert_eq!(name.0.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("savetv-dl.db");
        let id = TelecastId::new("777");

        let ledger = Ledger::open(&path).await.unwrap();
        ledger
            .insert(&id, Some("Doku"), Some(Path::new("/videos/doku.mp4")))
            .await
            .unwrap();
        ledger.close().await;

        let reopened = Ledger::open(&path).await.unwrap();
        assert!(reopened.has(&id).await.unwrap());
        assert_eq!(reopened.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_presence_is_independent_of_file_on_disk() {
        let ledger = in_memory().await;
        let id = TelecastId::new("5");
        ledger
            .insert(&id, Some("Gone"), Some(Path::new("/does/not/exist.mp4")))
            .await
            .unwrap();

        assert!(ledger.has(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_trait_record_on_concrete_ledger() {
        let ledger = in_memory().await;
        let id = TelecastId::new("900");

        ledger
            .record(&id, "Tatort", Path::new("/videos/tatort.mp4"))
            .await
            .unwrap();

        assert!(ledger.has(&id).await.unwrap());
        let (name, path): (Option<String>, Option<String>) = sqlx::query_as(
            "SELECT display_name, saved_path FROM finished_downloads WHERE telecast_id = '900'",
        )
        .fetch_one(ledger.db.pool())
        .await
        .unwrap();
        assert_eq!(name.as_deref(), Some("Tatort"));
        assert_eq!(path.as_deref(), Some("/videos/tatort.mp4"));
    }
}
