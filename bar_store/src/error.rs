//! Error taxonomy for the bar store.
//!
//! [`StoreError::Validation`] marks caller mistakes (unsupported timeframe,
//! malformed payload) and is never retried; the remaining variants wrap
//! persistence failures that threaten durability and must propagate.

use thiserror::Error;

/// Unified error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller-supplied input failed validation; indicates a programming or
    /// configuration defect, not a transient condition.
    #[error("validation error: {0}")]
    Validation(String),

    /// Opening the SQLite database failed.
    #[error("database connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),

    /// The underlying persistence engine reported a failure.
    #[error("database operation failed: {0}")]
    Database(#[from] diesel::result::Error),

    /// Applying embedded schema migrations failed.
    #[error("migration failed: {0}")]
    Migration(String),

    /// Filesystem error while preparing the database location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the store.
pub type StoreResult<T> = Result<T, StoreError>;
