//! Ranker
//!
//! Vendor-agreement scoring: one vote per vendor per canonical token,
//! descending count, ties by first appearance across vendors.
//! Pure function of its input; no hash-order dependence.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::types::RankedTag;
use crate::constants::DEFAULT_MIN_AGREEMENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ranker {
    /// Tokens with fewer agreeing vendors are dropped
    pub min_agreement: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self {
            min_agreement: DEFAULT_MIN_AGREEMENT,
        }
    }
}

impl Ranker {
    pub fn new(min_agreement: usize) -> Self {
        Self { min_agreement }
    }

    /// Rank the per-vendor token sequences of one sample
    pub fn rank(&self, per_vendor: &[Vec<String>]) -> Vec<RankedTag> {
        // first-seen order lives in `ranked`, `index` only points into it
        let mut ranked: Vec<RankedTag> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for tokens in per_vendor {
            let mut voted: HashSet<&str> = HashSet::new();
            for token in tokens {
                let token = token.as_str();
                if !voted.insert(token) {
                    continue;
                }
                match index.get(token) {
                    Some(&i) => ranked[i].count += 1,
                    None => {
                        index.insert(token, ranked.len());
                        ranked.push(RankedTag::new(token, 1));
                    }
                }
            }
        }

        // stable: equal counts keep first-seen order
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.retain(|t| t.count >= self.min_agreement);
        ranked
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn votes(v: &[&[&str]]) -> Vec<Vec<String>> {
        v.iter()
            .map(|tokens| tokens.iter().map(|t| t.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_counts_vendors() {
        let input = votes(&[&["zbot"], &["zbot", "spam"], &["zbot"]]);
        let ranked = Ranker::default().rank(&input);
        assert_eq!(ranked, vec![RankedTag::new("zbot", 3), RankedTag::new("spam", 1)]);
    }

    #[test]
    fn test_within_vendor_dedup() {
        let input = votes(&[&["zbot", "zbot", "zbot"], &["sality"]]);
        let ranked = Ranker::default().rank(&input);
        assert_eq!(ranked[0], RankedTag::new("zbot", 1));
        assert_eq!(ranked[1], RankedTag::new("sality", 1));
    }

    #[test]
    fn test_ties_by_first_appearance() {
        let input = votes(&[&["bbb", "aaa"], &["ccc", "aaa", "bbb"], &["ccc"]]);
        let ranked = Ranker::default().rank(&input);
        let order: Vec<_> = ranked.iter().map(|t| t.tag.as_str()).collect();
        // all three have two votes; bbb was seen first
        assert_eq!(order, vec!["bbb", "aaa", "ccc"]);
    }

    #[test]
    fn test_min_agreement() {
        let input = votes(&[&["zbot", "spam"], &["zbot"]]);
        let ranked = Ranker::new(2).rank(&input);
        assert_eq!(ranked, vec![RankedTag::new("zbot", 2)]);
    }

    #[test]
    fn test_deterministic() {
        let input = votes(&[&["x1", "y1", "z1"], &["z1", "y1"], &["q1"]]);
        let ranker = Ranker::default();
        assert_eq!(ranker.rank(&input), ranker.rank(&input));
    }

    #[test]
    fn test_empty_input() {
        let input: Vec<Vec<String>> = vec![vec![], vec![]];
        assert!(Ranker::default().rank(&input).is_empty());
    }
}
