//! Typed error enum for the storage layer.
//!
//! Lets callers match on the one recoverable failure (the column already
//! exists) instead of inspecting SQLSTATE codes themselves.

use thiserror::Error;

/// SQLSTATE raised by `ALTER TABLE ... ADD` when the column is already there.
const DUPLICATE_COLUMN: &str = "42701";

/// Storage-layer error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not open the connection pool.
    #[error("connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    /// `ALTER TABLE ... ADD` hit an existing column.
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// SQL / connection / timeout failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StorageError {
    /// Whether this error is the tolerated duplicate-column condition.
    pub fn is_duplicate_column(&self) -> bool {
        matches!(self, Self::DuplicateColumn(_))
    }
}

/// Custom `From<sqlx::Error>`, not a blanket `#[from]`.
///
/// - SQLSTATE 42701 → `DuplicateColumn`
/// - Everything else → `Database`
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err)
                if db_err.code().is_some_and(|c| c == DUPLICATE_COLUMN) =>
            {
                Self::DuplicateColumn(db_err.message().to_owned())
            },
            _ => Self::Database(err),
        }
    }
}
