//! Shared constants for card-normaliser.
//!
//! Table, column and environment names live here so the storage layer and the
//! binary agree on them.

/// Table holding one row per printed card.
pub const CARDS_TABLE: &str = "cards";

/// Side column holding the name a row had before normalisation.
pub const NORMALISED_NAME_COLUMN: &str = "normalised_name";

/// Width of [`NORMALISED_NAME_COLUMN`].
pub const NORMALISED_NAME_WIDTH: u32 = 150;

/// Scryfall API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.scryfall.com";

/// Lookup attempts per name before giving up on it.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Fixed pause between lookup attempts, in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 10;

/// Per-request HTTP timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// PostgreSQL connection string.
pub const ENV_DATABASE_URL: &str = "PSQL_URI";

/// Overrides [`DEFAULT_API_BASE_URL`].
pub const ENV_API_BASE_URL: &str = "SCRYFALL_API_URL";

/// Overrides [`DEFAULT_MAX_ATTEMPTS`].
pub const ENV_MAX_ATTEMPTS: &str = "NORMALISER_MAX_ATTEMPTS";

/// Overrides [`DEFAULT_RETRY_DELAY_SECS`].
pub const ENV_RETRY_DELAY_SECS: &str = "NORMALISER_RETRY_DELAY_SECS";

/// Overrides [`DEFAULT_REQUEST_TIMEOUT_SECS`].
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "NORMALISER_REQUEST_TIMEOUT_SECS";
