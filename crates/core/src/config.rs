//! Run configuration, assembled once at startup from the process environment.

use std::time::Duration;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RETRY_DELAY_SECS, ENV_API_BASE_URL, ENV_DATABASE_URL, ENV_MAX_ATTEMPTS,
    ENV_REQUEST_TIMEOUT_SECS, ENV_RETRY_DELAY_SECS,
};
use crate::env_config::parse_with_default;
use crate::error::{ConfigError, Result};

/// Everything one normalisation run needs to know.
#[derive(Clone)]
pub struct NormaliserConfig {
    pub database_url: String,
    pub api_base_url: String,
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub request_timeout: Duration,
    pub dry_run: bool,
}

impl std::fmt::Debug for NormaliserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormaliserConfig")
            .field("database_url", &"***")
            .field("api_base_url", &self.api_base_url)
            .field("max_attempts", &self.max_attempts)
            .field("retry_delay", &self.retry_delay)
            .field("request_timeout", &self.request_timeout)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl NormaliserConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if `PSQL_URI` is missing or empty, or if a value is out of range.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// See [`NormaliserConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(ENV_DATABASE_URL).ok_or(ConfigError::Missing(ENV_DATABASE_URL))?;
        if database_url.trim().is_empty() {
            return Err(ConfigError::Empty(ENV_DATABASE_URL));
        }

        let api_base_url = lookup(ENV_API_BASE_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let api_base_url = api_base_url.trim().trim_end_matches('/').to_owned();
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: ENV_API_BASE_URL,
                reason: format!("expected an http(s) URL, got {api_base_url:?}"),
            });
        }

        let max_attempts = parse_with_default(
            ENV_MAX_ATTEMPTS,
            lookup(ENV_MAX_ATTEMPTS).as_deref(),
            DEFAULT_MAX_ATTEMPTS,
        );
        if max_attempts == 0 {
            return Err(ConfigError::Invalid {
                var: ENV_MAX_ATTEMPTS,
                reason: "at least one attempt is required".to_owned(),
            });
        }

        let retry_delay_secs = parse_with_default(
            ENV_RETRY_DELAY_SECS,
            lookup(ENV_RETRY_DELAY_SECS).as_deref(),
            DEFAULT_RETRY_DELAY_SECS,
        );
        let request_timeout_secs = parse_with_default(
            ENV_REQUEST_TIMEOUT_SECS,
            lookup(ENV_REQUEST_TIMEOUT_SECS).as_deref(),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        );
        if request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: ENV_REQUEST_TIMEOUT_SECS,
                reason: "a zero timeout fails every request".to_owned(),
            });
        }

        Ok(Self {
            database_url,
            api_base_url,
            max_attempts,
            retry_delay: Duration::from_secs(retry_delay_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
            dry_run: false,
        })
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
