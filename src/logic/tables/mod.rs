//! Rule Tables Module
//!
//! Static, read-only configuration shared by every sample:
//! - `taxonomy`: tag -> category + path
//! - `alias`: raw token -> canonical tokens
//! - `generic`: tokens that never name a family
//! - `loader`: text formats for the three tables
//!
//! A small default rule set is embedded at compile time (`data/`).

pub mod alias;
pub mod generic;
pub mod loader;
pub mod taxonomy;

pub use alias::AliasTable;
pub use generic::GenericSet;
pub use taxonomy::{Category, Taxonomy, TaxonomyEntry};

use crate::config::TablePaths;
use crate::error::ConfigResult;
use crate::logic::labels::Tokenizer;

const BUILTIN_GENERICS: &str = include_str!("../../../data/default.generics");
const BUILTIN_ALIASES: &str = include_str!("../../../data/default.aliases");
const BUILTIN_TAXONOMY: &str = include_str!("../../../data/default.taxonomy");

/// The three tables, bundled
#[derive(Debug, Clone, Default)]
pub struct RuleTables {
    pub taxonomy: Taxonomy,
    pub aliases: AliasTable,
    pub generics: GenericSet,
}

impl RuleTables {
    pub fn new(taxonomy: Taxonomy, aliases: AliasTable, generics: GenericSet) -> Self {
        Self {
            taxonomy,
            aliases,
            generics,
        }
    }

    /// Embedded default rule set
    pub fn builtin(tokenizer: &Tokenizer) -> ConfigResult<Self> {
        Ok(Self {
            taxonomy: loader::parse_taxonomy(BUILTIN_TAXONOMY, "builtin:taxonomy")?,
            aliases: loader::parse_aliases(BUILTIN_ALIASES, "builtin:aliases", tokenizer)?,
            generics: loader::parse_generics(BUILTIN_GENERICS, "builtin:generics")?,
        })
    }

    /// Load each table from its file, falling back to the embedded default
    /// for tables without a configured path
    pub fn load(paths: &TablePaths, tokenizer: &Tokenizer) -> ConfigResult<Self> {
        let taxonomy = match &paths.taxonomy {
            Some(p) => loader::load_taxonomy(p)?,
            None => loader::parse_taxonomy(BUILTIN_TAXONOMY, "builtin:taxonomy")?,
        };
        let aliases = match &paths.aliases {
            Some(p) => loader::load_aliases(p, tokenizer)?,
            None => loader::parse_aliases(BUILTIN_ALIASES, "builtin:aliases", tokenizer)?,
        };
        let generics = match &paths.generics {
            Some(p) => loader::load_generics(p)?,
            None => loader::parse_generics(BUILTIN_GENERICS, "builtin:generics")?,
        };
        Ok(Self::new(taxonomy, aliases, generics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_parse() {
        let tables = RuleTables::builtin(&Tokenizer::default()).unwrap();
        assert!(tables.generics.contains("trojan"));
        assert!(!tables.aliases.is_empty());
        assert_eq!(tables.taxonomy.category("zbot"), Category::Family);
    }

    #[test]
    fn test_load_mixes_files_and_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let generics = dir.path().join("custom.generics");
        std::fs::write(&generics, "onlythis\n").unwrap();

        let paths = TablePaths {
            generics: Some(generics),
            ..Default::default()
        };
        let tables = RuleTables::load(&paths, &Tokenizer::default()).unwrap();
        assert_eq!(tables.generics.len(), 1);
        assert!(!tables.taxonomy.is_empty());
    }
}
