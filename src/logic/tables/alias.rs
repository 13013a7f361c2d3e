//! Alias / Expansion Table
//!
//! Raw token -> canonical token(s). Three kinds of key:
//! - single token (`zeus`)
//! - dotted phrase matching consecutive tokens of one label (`zbot.gen`)
//! - prefix rule with a trailing `*` (`toolbar*`)
//!
//! Keys are normalized with the label tokenizer so a key always looks like
//! the tokens it is compared against.

use std::collections::HashMap;

use crate::logic::labels::Tokenizer;

/// Marker for "drop this token" in an expansion
pub const DELETE_MARKER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
struct PrefixRule {
    stem: String,
    canonical: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    /// Phrase fragments joined by '.' -> expansion
    exact: HashMap<String, Vec<String>>,
    /// Declaration order is the tie-break
    prefixes: Vec<PrefixRule>,
    max_phrase_len: usize,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert with the default tokenizer
    pub fn insert(&mut self, raw: &str, canonical: &[&str]) -> bool {
        self.insert_with(raw, canonical, &Tokenizer::default())
    }

    /// Insert an entry. Returns false if the key normalizes to nothing or is
    /// already declared (the first declaration wins).
    pub fn insert_with(&mut self, raw: &str, canonical: &[&str], tokenizer: &Tokenizer) -> bool {
        let canonical = normalize_expansion(canonical);
        let raw = raw.trim().to_lowercase();

        if let Some(stem) = raw.strip_suffix('*') {
            let stem = stem.trim();
            if stem.is_empty() || self.prefixes.iter().any(|r| r.stem == stem) {
                return false;
            }
            self.prefixes.push(PrefixRule {
                stem: stem.to_string(),
                canonical,
            });
            return true;
        }

        let fragments = tokenizer.tokenize(&raw);
        if fragments.is_empty() {
            return false;
        }
        let key = fragments.join(".");
        if self.exact.contains_key(&key) {
            return false;
        }
        self.max_phrase_len = self.max_phrase_len.max(fragments.len());
        self.exact.insert(key, canonical);
        true
    }

    /// Exact lookup of a single token or a '.'-joined phrase
    pub fn lookup_exact(&self, key: &str) -> Option<&[String]> {
        self.exact.get(key).map(|v| v.as_slice())
    }

    /// Longest matching prefix rule; ties go to the earliest declared rule
    pub fn lookup_prefix(&self, token: &str) -> Option<&[String]> {
        let mut best: Option<&PrefixRule> = None;
        for rule in &self.prefixes {
            if !token.starts_with(rule.stem.as_str()) {
                continue;
            }
            match best {
                Some(b) if b.stem.len() >= rule.stem.len() => {}
                _ => best = Some(rule),
            }
        }
        best.map(|r| r.canonical.as_slice())
    }

    /// Longest phrase key, in tokens
    pub fn max_phrase_len(&self) -> usize {
        self.max_phrase_len
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn normalize_expansion(canonical: &[&str]) -> Vec<String> {
    canonical
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty() && t != DELETE_MARKER)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_phrase_keys() {
        let mut table = AliasTable::new();
        assert!(table.insert("Zeus", &["zbot"]));
        assert!(table.insert("zbot.gen", &["zbot"]));

        assert_eq!(table.lookup_exact("zeus"), Some(&["zbot".to_string()][..]));
        assert_eq!(table.lookup_exact("zbot.gen"), Some(&["zbot".to_string()][..]));
        assert_eq!(table.max_phrase_len(), 2);
    }

    #[test]
    fn test_noise_fragments_normalized_out_of_key() {
        let mut table = AliasTable::new();
        // "a" is single-character noise, so the key is just "zbot"
        assert!(table.insert("zbot.a", &["zbot"]));
        assert!(table.lookup_exact("zbot").is_some());
        assert_eq!(table.max_phrase_len(), 1);
    }

    #[test]
    fn test_first_declaration_wins() {
        let mut table = AliasTable::new();
        assert!(table.insert("zeus", &["zbot"]));
        assert!(!table.insert("ZEUS", &["other"]));
        assert_eq!(table.lookup_exact("zeus").unwrap()[0], "zbot");
    }

    #[test]
    fn test_longest_prefix_wins() {
        let mut table = AliasTable::new();
        table.insert("tool*", &["tool"]);
        table.insert("toolbar*", &["toolbar"]);

        assert_eq!(table.lookup_prefix("toolbarpup").unwrap()[0], "toolbar");
        assert_eq!(table.lookup_prefix("toolkit").unwrap()[0], "tool");
        assert!(table.lookup_prefix("zbot").is_none());
    }

    #[test]
    fn test_delete_marker_gives_empty_expansion() {
        let mut table = AliasTable::new();
        table.insert("optional", &[DELETE_MARKER]);
        assert_eq!(table.lookup_exact("optional"), Some(&[][..]));
    }

    #[test]
    fn test_multi_token_expansion() {
        let mut table = AliasTable::new();
        table.insert("zeusbot", &["zbot", "spyware"]);
        assert_eq!(table.lookup_exact("zeusbot").unwrap().len(), 2);
    }
}
