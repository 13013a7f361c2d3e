//! Taxonomy
//!
//! Canonical tag -> (category, hierarchical path).
//! Read-only after construction; a tag the taxonomy does not know is `UNK`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORY
// ============================================================================

/// Taxonomy category of a canonical tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Malware family name
    Family,
    /// Not in the taxonomy (candidate family)
    Unknown,
    /// Potentially unwanted program (adware/toolbar names)
    Pup,
    /// Behavior (downloader, spam, ...)
    Behavior,
    /// Malware class (worm, virus, grayware, ...)
    Class,
    /// File property (platform, packer, language)
    FileProperty,
    /// Too generic to identify anything
    Generic,
}

impl Category {
    pub fn code(&self) -> &'static str {
        match self {
            Category::Family => "FAM",
            Category::Unknown => "UNK",
            Category::Pup => "PUP",
            Category::Behavior => "BEH",
            Category::Class => "CLASS",
            Category::FileProperty => "FILE",
            Category::Generic => "GEN",
        }
    }

    /// Categories that may name a family directly
    pub fn is_family_like(&self) -> bool {
        matches!(self, Category::Family | Category::Unknown)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FAM" => Ok(Category::Family),
            "UNK" => Ok(Category::Unknown),
            "PUP" => Ok(Category::Pup),
            "BEH" => Ok(Category::Behavior),
            "CLASS" => Ok(Category::Class),
            "FILE" => Ok(Category::FileProperty),
            "GEN" => Ok(Category::Generic),
            other => Err(other.to_string()),
        }
    }
}

// ============================================================================
// TAXONOMY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub category: Category,
    pub path: String,
}

#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    entries: HashMap<String, TaxonomyEntry>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag. Returns false (and keeps the old entry) if already declared.
    ///
    /// `path` defaults to `CODE:tag`.
    pub fn insert(&mut self, tag: &str, category: Category, path: Option<&str>) -> bool {
        let tag = tag.trim().to_lowercase();
        if self.entries.contains_key(&tag) {
            return false;
        }
        let path = match path {
            Some(p) if !p.trim().is_empty() => p.trim().to_string(),
            _ => format!("{}:{}", category.code(), tag),
        };
        self.entries.insert(tag, TaxonomyEntry { category, path });
        true
    }

    pub fn get(&self, tag: &str) -> Option<&TaxonomyEntry> {
        self.entries.get(tag)
    }

    pub fn category(&self, tag: &str) -> Category {
        self.entries
            .get(tag)
            .map(|e| e.category)
            .unwrap_or(Category::Unknown)
    }

    /// Hierarchical path; unknown tags render as `UNK:tag`
    pub fn path(&self, tag: &str) -> String {
        match self.entries.get(tag) {
            Some(e) => e.path.clone(),
            None => format!("{}:{}", Category::Unknown.code(), tag),
        }
    }

    pub fn is_generic(&self, tag: &str) -> bool {
        self.category(tag) == Category::Generic
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
