//! Generic Filter
//!
//! Keep/drop decision for one canonical token. Runs after alias resolution.

use crate::logic::tables::{GenericSet, Taxonomy};

#[derive(Debug, Clone, Copy)]
pub struct GenericFilter<'a> {
    generics: &'a GenericSet,
    taxonomy: Option<&'a Taxonomy>,
}

impl<'a> GenericFilter<'a> {
    pub fn new(generics: &'a GenericSet) -> Self {
        Self {
            generics,
            taxonomy: None,
        }
    }

    /// Also drop tokens the taxonomy categorises as generic
    pub fn with_taxonomy(mut self, taxonomy: &'a Taxonomy) -> Self {
        self.taxonomy = Some(taxonomy);
        self
    }

    pub fn keep(&self, token: &str) -> bool {
        if self.generics.contains(token) {
            return false;
        }
        !self.taxonomy.is_some_and(|tax| tax.is_generic(token))
    }

    pub fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().filter(|t| self.keep(t)).collect()
    }
}
