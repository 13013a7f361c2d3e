//! Alias Resolver
//!
//! Maps the raw tokens of one label to canonical tokens.
//! Matching order at each position:
//! 1. longest phrase key over the following tokens
//! 2. exact single-token key
//! 3. longest prefix rule (declaration order breaks ties)
//! 4. pass-through
//!
//! A canonical token is never resolved again in the same pass.

use crate::logic::tables::AliasTable;

#[derive(Debug, Clone, Copy)]
pub struct AliasResolver<'a> {
    table: &'a AliasTable,
}

impl<'a> AliasResolver<'a> {
    pub fn new(table: &'a AliasTable) -> Self {
        Self { table }
    }

    /// Canonical form(s) of a single raw token
    pub fn resolve(&self, token: &str) -> Vec<String> {
        let token = token.to_lowercase();
        if let Some(expansion) = self.table.lookup_exact(&token) {
            return expansion.to_vec();
        }
        if let Some(expansion) = self.table.lookup_prefix(&token) {
            return expansion.to_vec();
        }
        vec![token]
    }

    /// Canonical tokens of a whole label, phrase keys included
    pub fn resolve_sequence(&self, tokens: &[String]) -> Vec<String> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut pos = 0;

        while pos < tokens.len() {
            if let Some((consumed, expansion)) = self.match_phrase(&tokens[pos..]) {
                log::trace!("phrase {:?} -> {:?}", &tokens[pos..pos + consumed], expansion);
                out.extend_from_slice(expansion);
                pos += consumed;
                continue;
            }
            out.extend(self.resolve(&tokens[pos]));
            pos += 1;
        }
        out
    }

    /// Longest multi-token key starting at the head of `tokens`
    fn match_phrase(&self, tokens: &[String]) -> Option<(usize, &'a [String])> {
        let longest = self.table.max_phrase_len().min(tokens.len());
        (2..=longest).rev().find_map(|len| {
            let key = tokens[..len].join(".");
            self.table.lookup_exact(&key).map(|expansion| (len, expansion))
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn table() -> AliasTable {
        let mut t = AliasTable::new();
        t.insert("zeus", &["zbot"]);
        t.insert("zbot.gen", &["zbot"]);
        t.insert("kryptik.zbot.gen", &["zbot", "packed"]);
        t.insert("toolbar*", &["toolbar"]);
        t.insert("optional", &["-"]);
        t
    }

    #[test]
    fn test_pass_through() {
        let t = table();
        let r = AliasResolver::new(&t);
        assert_eq!(r.resolve("sality"), vec!["sality"]);
    }

    #[test]
    fn test_exact_before_prefix() {
        let mut t = table();
        t.insert("toolbarx", &["special"]);
        let r = AliasResolver::new(&t);
        assert_eq!(r.resolve("toolbarx"), vec!["special"]);
        assert_eq!(r.resolve("toolbarpup"), vec!["toolbar"]);
    }

    #[test]
    fn test_phrase_longest_match() {
        let t = table();
        let r = AliasResolver::new(&t);
        assert_eq!(
            r.resolve_sequence(&toks(&["win32", "zbot", "gen"])),
            vec!["win32", "zbot"]
        );
        assert_eq!(
            r.resolve_sequence(&toks(&["kryptik", "zbot", "gen"])),
            vec!["zbot", "packed"]
        );
    }

    #[test]
    fn test_delete_expansion() {
        let t = table();
        let r = AliasResolver::new(&t);
        assert_eq!(r.resolve_sequence(&toks(&["pup", "optional", "toolbar"])), vec!["pup", "toolbar"]);
    }

    #[test]
    fn test_no_chained_expansion() {
        let mut t = AliasTable::new();
        t.insert("aaa", &["bbb"]);
        t.insert("bbb", &["ccc"]);
        let r = AliasResolver::new(&t);
        assert_eq!(r.resolve("aaa"), vec!["bbb"]);
    }

    #[test]
    fn test_resolution_is_consistent() {
        let t = table();
        let r = AliasResolver::new(&t);
        assert_eq!(r.resolve("Zeus"), r.resolve("zeus"));
        assert_eq!(r.resolve("zeus"), r.resolve("zeus"));
    }
}
