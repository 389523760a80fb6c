//! SQLite storage behind the completion ledger.
//!
//! The file lives in the working directory and survives between runs.
//! Journaling is WAL so that an insert interrupted by a crash never corrupts
//! entries written by earlier runs.
//!
//! # Example
//!
//! ```no_run
//! use savetv_core::Database;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::open(Path::new("savetv-dl.db")).await?;
//! db.close().await;
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::time::Duration;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tracing::{debug, instrument};

/// How long a statement waits on a locked file before giving up.
const LOCK_WAIT: Duration = Duration::from_secs(5);

/// Errors while opening the ledger database.
#[derive(Debug, Error)]
pub enum DbError {
    /// The file could not be opened or created.
    #[error("cannot open database: {0}")]
    Open(#[from] sqlx::Error),

    /// The schema could not be brought up to date.
    #[error("cannot apply schema migrations: {0}")]
    Migrate(#[from] MigrateError),
}

/// Handle to the ledger database.
///
/// Cloning is cheap; all clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database file at `path`, creating it if missing, and applies
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Open`] or [`DbError::Migrate`].
    #[instrument(skip(path), fields(path = %path.display()))]
    pub async fn open(path: &Path) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(LOCK_WAIT);

        // The pipeline is sequential; a second connection would only contend.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::migrated(pool).await
    }

    /// Opens a private in-memory database. Contents vanish on drop.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Open`] or [`DbError::Migrate`].
    pub async fn open_in_memory() -> Result<Self, DbError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        Self::migrated(pool).await
    }

    async fn migrated(pool: SqlitePool) -> Result<Self, DbError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        debug!("ledger schema up to date");
        Ok(Self { pool })
    }

    /// Connection pool for queries.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the pool, checkpointing the WAL.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
