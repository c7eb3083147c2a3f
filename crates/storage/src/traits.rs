//! Storage trait abstraction
//!
//! The normalisation pipeline only talks to [`CardStore`], so it can run
//! against PostgreSQL or an in-memory table in tests.

use async_trait::async_trait;

use crate::error::StorageError;

/// Operations the normalisation run performs on the `cards` table.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Add the `normalised_name` column. Returns `true` if it was added,
    /// `false` if it already existed.
    async fn ensure_normalised_column(&self) -> Result<bool, StorageError>;

    /// Distinct non-null card names, in whatever order the database returns them.
    async fn distinct_names(&self) -> Result<Vec<String>, StorageError>;

    /// Stamp `normalised_name = original` on rows named `original`, then rename
    /// those rows to `canonical`. Both writes commit together or not at all.
    /// Returns the number of rows renamed.
    async fn apply_canonical_name(
        &self,
        original: &str,
        canonical: &str,
    ) -> Result<u64, StorageError>;
}
