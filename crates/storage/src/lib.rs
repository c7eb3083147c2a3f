//! Storage layer for card-normaliser
//!
//! PostgreSQL access to the `cards` table behind the [`CardStore`] trait.

mod error;
mod pg_store;
pub mod traits;

pub use error::StorageError;
pub use pg_store::PgCardStore;
pub use traits::CardStore;
