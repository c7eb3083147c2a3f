//! Scryfall client for resolving canonical card names

mod api_types;
mod client;
mod error;

pub use client::ScryfallClient;
pub use error::ScryfallError;
