//! Label Tokenizer
//!
//! Splits one vendor label into lowercase candidate tokens.
//! Never fails: a label made only of delimiters or noise yields no tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MIN_TOKEN_LEN, HASH_PREFIX_MIN_LEN};
use crate::logic::sample::SampleIdentity;

/// Every non-alphanumeric run is a delimiter: `.`, `/`, `-`, `:`, `!`, `@`,
/// brackets and whitespace all separate tokens (`TR/`, `HEUR:`, `!rfn`, ...)
static DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9A-Za-z]+").expect("delimiter pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tokenizer {
    /// Shorter tokens are noise
    pub min_len: usize,
    /// Fold variant counters (`zbot2` -> `zbot`)
    pub strip_trailing_digits: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_TOKEN_LEN,
            strip_trailing_digits: false,
        }
    }
}

impl Tokenizer {
    pub fn new(min_len: usize) -> Self {
        Self {
            min_len,
            ..Default::default()
        }
    }

    pub fn with_trailing_digits_stripped(mut self, strip: bool) -> Self {
        self.strip_trailing_digits = strip;
        self
    }

    /// Tokenize a label on its own
    pub fn tokenize(&self, label: &str) -> Vec<String> {
        DELIMITERS
            .split(label)
            .filter_map(|fragment| self.normalize_fragment(fragment))
            .collect()
    }

    /// Tokenize a label of a known sample, dropping tokens that are a prefix
    /// of one of the sample's own digests
    pub fn tokenize_for(&self, label: &str, identity: &SampleIdentity) -> Vec<String> {
        self.tokenize(label)
            .into_iter()
            .filter(|token| !is_hash_fragment(token, identity))
            .collect()
    }

    fn normalize_fragment(&self, fragment: &str) -> Option<String> {
        if fragment.is_empty() || fragment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let mut token = fragment.to_ascii_lowercase();
        if self.strip_trailing_digits {
            let kept = token.trim_end_matches(|c: char| c.is_ascii_digit()).len();
            token.truncate(kept);
        }
        if token.len() < self.min_len.max(1) {
            return None;
        }
        Some(token)
    }
}

fn is_hash_fragment(token: &str, identity: &SampleIdentity) -> bool {
    token.len() >= HASH_PREFIX_MIN_LEN && identity.digests().any(|h| h.starts_with(token))
}

// ============================================================================
// TESTS
// ============================================================================
