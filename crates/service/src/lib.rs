//! Service layer for card-normaliser
//!
//! Runs the schema step, the name listing and the resolve-and-update loop
//! against a [`card_normaliser_storage::CardStore`] and a Scryfall client.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

mod error;
mod normalise_service;
mod report;

pub use error::ServiceError;
pub use normalise_service::{run_with_config, NormaliseService};
pub use report::MigrationReport;
