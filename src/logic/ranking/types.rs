//! Ranking Types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::logic::tables::Taxonomy;

/// A canonical token and the number of vendors that voted for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTag {
    pub tag: String,
    pub count: usize,
}

impl RankedTag {
    pub fn new(tag: &str, count: usize) -> Self {
        Self {
            tag: tag.to_string(),
            count,
        }
    }
}

impl fmt::Display for RankedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.tag, self.count)
    }
}

/// Render `path|count` pairs joined by commas. Without a taxonomy the bare
/// token stands in for the path.
pub fn format_tag_pairs(tags: &[RankedTag], taxonomy: Option<&Taxonomy>) -> String {
    tags.iter()
        .map(|t| match taxonomy {
            Some(tax) => format!("{}|{}", tax.path(&t.tag), t.count),
            None => t.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}
