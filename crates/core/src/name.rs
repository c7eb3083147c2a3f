//! Card name helpers.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation regex is valid"));

/// Folds a card name to the loose form used for comparisons: hyphens become
/// spaces, NFKC, punctuation dropped, lowercase.
#[must_use]
pub fn normalise(name: &str) -> String {
    let folded: String = name.replace('-', " ").nfkc().collect();
    PUNCTUATION.replace_all(&folded, "").to_lowercase()
}

/// Successful lookup result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalName {
    pub name: String,
    /// HTTP attempts spent, including the successful one.
    pub attempts: u32,
}

impl CanonicalName {
    /// Number of backoff sleeps taken before the lookup succeeded.
    #[must_use]
    pub const fn backoffs(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }
}

/// How a stored name relates to the canonical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Unchanged,
    /// Differs only in case, punctuation or hyphenation.
    Cosmetic,
    Renamed,
}

impl Resolution {
    #[must_use]
    pub fn classify(original: &str, canonical: &str) -> Self {
        if original == canonical {
            Self::Unchanged
        } else if normalise(original) == normalise(canonical) {
            Self::Cosmetic
        } else {
            Self::Renamed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Cosmetic => "cosmetic",
            Self::Renamed => "renamed",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
