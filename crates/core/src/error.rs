use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised while assembling [`crate::NormaliserConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{0} environment variable is empty")]
    Empty(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

pub type Result<T> = StdResult<T, ConfigError>;
