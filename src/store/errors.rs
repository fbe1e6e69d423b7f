//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence errors.
///
/// Not-found is never a store error: lookups return `Option`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error reported by SQLite
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A previous holder of the connection panicked
    #[error("store connection lock poisoned")]
    LockPoisoned,

    /// Filesystem error while preparing the database location
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// True when SQLite rejected a write because of a UNIQUE, CHECK or
    /// FOREIGN KEY constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Database(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}
