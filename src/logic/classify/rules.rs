//! Classification Rules & Policy
//!
//! PUP cutoff and family fallback, kept as configuration rather than
//! constants baked into the classifier.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PUP_LEADING_TOKENS, DEFAULT_PUP_PATH_PREFIX};

// ============================================================================
// PUP POLICY
// ============================================================================

/// Which ranked tokens the PUP detector looks at, and what counts as PUP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PupPolicy {
    /// Number of leading ranked tokens inspected (0 disables detection)
    pub leading_tokens: usize,
    /// Extend the window with tokens tied with the last one inside it
    pub include_ties: bool,
    /// Taxonomy paths (and their children) that mark a PUP indicator,
    /// in addition to the `PUP` category itself
    pub path_prefixes: Vec<String>,
}

impl Default for PupPolicy {
    fn default() -> Self {
        Self {
            leading_tokens: DEFAULT_PUP_LEADING_TOKENS,
            include_ties: true,
            path_prefixes: vec![DEFAULT_PUP_PATH_PREFIX.to_string()],
        }
    }
}

impl PupPolicy {
    /// Only the single top token, ties ignored
    pub fn strict() -> Self {
        Self {
            leading_tokens: 1,
            include_ties: false,
            ..Default::default()
        }
    }

    /// Top three tokens plus ties
    pub fn lenient() -> Self {
        Self {
            leading_tokens: 3,
            include_ties: true,
            ..Default::default()
        }
    }

    /// Any PUP indicator anywhere in the ranked list
    pub fn whole_list() -> Self {
        Self {
            leading_tokens: usize::MAX,
            ..Default::default()
        }
    }

    pub fn with_leading_tokens(mut self, n: usize) -> Self {
        self.leading_tokens = n;
        self
    }

    /// `path` equals a prefix or sits below it in the hierarchy
    pub fn matches_path(&self, path: &str) -> bool {
        self.path_prefixes.iter().any(|prefix| {
            path == prefix
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with(':'))
        })
    }
}

// ============================================================================
// CLASSIFIER POLICY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierPolicy {
    pub pup: PupPolicy,
    /// Use the first `PUP` category token as family when no `FAM`/`UNK`
    /// token is ranked. Off: such samples are singletons.
    pub pup_family_fallback: bool,
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            pup: PupPolicy::default(),
            pup_family_fallback: false,
        }
    }
}

impl ClassifierPolicy {
    pub fn with_pup_family_fallback(mut self, enabled: bool) -> Self {
        self.pup_family_fallback = enabled;
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = PupPolicy::default();
        assert_eq!(policy.leading_tokens, 1);
        assert!(policy.include_ties);
        assert!(!ClassifierPolicy::default().pup_family_fallback);
    }

    #[test]
    fn test_presets() {
        assert!(!PupPolicy::strict().include_ties);
        assert_eq!(PupPolicy::lenient().leading_tokens, 3);
        assert_eq!(PupPolicy::whole_list().leading_tokens, usize::MAX);
    }

    #[test]
    fn test_path_prefix_matching() {
        let policy = PupPolicy::default();
        assert!(policy.matches_path("CLASS:grayware"));
        assert!(policy.matches_path("CLASS:grayware:adware"));
        assert!(!policy.matches_path("CLASS:graywarez"));
        assert!(!policy.matches_path("FAM:grayware"));
    }
}
