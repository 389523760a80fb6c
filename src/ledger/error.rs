//! Error types for ledger operations.

use thiserror::Error;

use crate::db::DbError;

/// Errors from the completion ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Opening the ledger database failed.
    #[error("failed to open ledger: {0}")]
    Open(#[from] DbError),

    /// A ledger query failed.
    #[error("ledger query failed: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_wraps_sqlx_error() {
        let err = LedgerError::from(sqlx::Error::PoolClosed);
        assert!(err.to_string().starts_with("ledger query failed"));
    }
}
