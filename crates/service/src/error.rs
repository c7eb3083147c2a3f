//! Typed error enum for the service layer.
//!
//! Unifies storage and Scryfall failures so the binary can report either one
//! through a single `?`.

use card_normaliser_scryfall::ScryfallError;
use card_normaliser_storage::StorageError;
use thiserror::Error;

/// Failures that abort a normalisation run.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (connection, DDL, query, write).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Scryfall client could not be set up.
    #[error("scryfall: {0}")]
    Scryfall(#[from] ScryfallError),
}
