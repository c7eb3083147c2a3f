//! Core types for card-normaliser
//!
//! Configuration, shared constants and the name helpers used by every other crate.

mod config;
pub mod constants;
mod env_config;
mod error;
mod name;

pub use config::NormaliserConfig;
pub use error::{ConfigError, Result};
pub use name::{normalise, CanonicalName, Resolution};
