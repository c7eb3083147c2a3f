use std::time::Duration;

use card_normaliser_core::constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_SECS};
use card_normaliser_core::{CanonicalName, NormaliserConfig};
use reqwest::header::ACCEPT;

use crate::api_types::SearchResponse;
use crate::error::ScryfallError;

/// Error bodies are cut to this many bytes before they land in logs.
const MAX_ERROR_BODY_LEN: usize = 200;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for the Scryfall card search endpoint.
#[derive(Debug, Clone)]
pub struct ScryfallClient {
    client: reqwest::Client,
    base_url: String,
    max_attempts: u32,
    retry_delay: Duration,
}

impl ScryfallClient {
    /// Creates a client with the default retry policy.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ScryfallError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ScryfallError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        })
    }

    /// # Errors
    /// See [`ScryfallClient::new`].
    pub fn from_config(config: &NormaliserConfig) -> Result<Self, ScryfallError> {
        Ok(Self::new(&config.api_base_url, config.request_timeout)?
            .with_retry_policy(config.max_attempts, config.retry_delay))
    }

    /// Overrides the attempt cap (clamped to at least one) and the fixed pause
    /// between attempts.
    #[must_use]
    pub fn with_retry_policy(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_delay = retry_delay;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Looks `name` up and returns the first match's canonical name.
    ///
    /// Every transport failure and non-success status is retried after
    /// `retry_delay`, up to `max_attempts` in total.
    ///
    /// # Errors
    /// `RetriesExhausted` once the cap is hit; `NoResults` or `JsonParse` when a
    /// successful response carries no usable card.
    pub async fn search_canonical_name(&self, name: &str) -> Result<CanonicalName, ScryfallError> {
        let url = format!("{}/cards/search", self.base_url);
        let mut last_error: Option<ScryfallError> = None;

        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                tokio::time::sleep(self.retry_delay).await;
                tracing::warn!(
                    card = name,
                    "Scryfall retry attempt {attempt}/{} after {:?}",
                    self.max_attempts,
                    self.retry_delay
                );
            }

            match self.search_once(&url, name).await {
                Ok(canonical) => return Ok(CanonicalName { name: canonical, attempts: attempt }),
                Err(e) if e.is_retryable() => {
                    tracing::debug!(card = name, attempt, "Scryfall lookup failed: {e}");
                    last_error = Some(e);
                },
                Err(e) => return Err(e),
            }
        }

        Err(ScryfallError::RetriesExhausted {
            attempts: self.max_attempts,
            last: Box::new(last_error.unwrap_or_else(|| {
                ScryfallError::ClientInit("no attempt was made".to_owned())
            })),
        })
    }

    async fn search_once(&self, url: &str, name: &str) -> Result<String, ScryfallError> {
        let response = self
            .client
            .get(url)
            .query(&[("q", name)])
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            return Err(ScryfallError::HttpStatus {
                code: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_LEN).to_owned(),
            });
        }

        let body = response.text().await?;
        let search: SearchResponse =
            serde_json::from_str(&body).map_err(|e| ScryfallError::JsonParse {
                context: format!(
                    "card search response (body: {})",
                    truncate(&body, MAX_ERROR_BODY_LEN)
                ),
                source: e,
            })?;

        search
            .data
            .into_iter()
            .next()
            .map(|card| card.name)
            .ok_or_else(|| ScryfallError::NoResults { query: name.to_owned() })
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub(crate) fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundary() {
        assert_eq!(truncate("Lim-Dûl", 6), "Lim-D");
        assert_eq!(truncate("short", 50), "short");
    }

    #[test]
    fn test_retry_policy_clamps_to_one_attempt() {
        let client = ScryfallClient::new("http://localhost/", Duration::from_secs(1))
            .unwrap()
            .with_retry_policy(0, Duration::ZERO);
        assert_eq!(client.max_attempts(), 1);
        assert_eq!(client.base_url(), "http://localhost");
    }

    #[test]
    fn test_new_uses_default_retry_policy() {
        let client =
            ScryfallClient::new("https://api.scryfall.com", Duration::from_secs(30)).unwrap();
        assert_eq!(client.max_attempts(), DEFAULT_MAX_ATTEMPTS);
    }
}
