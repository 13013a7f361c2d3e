//! Generic Token Set
//!
//! Tokens that describe a broad class ("trojan", "malware", "agent")
//! rather than a family. Lowercase, read-only after construction.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct GenericSet {
    tokens: HashSet<String>,
}

impl GenericSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: &str) -> bool {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return false;
        }
        self.tokens.insert(token)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for GenericSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = GenericSet::new();
        for token in iter {
            set.insert(token.as_ref());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let set: GenericSet = [" Trojan ", "WIN32", ""].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("trojan"));
        assert!(set.contains("win32"));
    }
}
