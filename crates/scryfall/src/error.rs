//! Typed error enum for the Scryfall crate.

use thiserror::Error;

/// Errors from Scryfall lookups.
#[derive(Debug, Error)]
pub enum ScryfallError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no cards matched {query:?}")]
    NoResults { query: String },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("all {attempts} attempts failed, last error: {last}")]
    RetriesExhausted { attempts: u32, last: Box<ScryfallError> },
}

impl ScryfallError {
    /// Whether the lookup loop retries after this error. Every HTTP-level
    /// failure is retried regardless of status; a malformed or empty 200 is not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::HttpRequest(_) | Self::HttpStatus { .. })
    }
}
