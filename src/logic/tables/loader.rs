//! Rule Table Loader
//!
//! Parses the three text resources into in-memory tables.
//! Any failure here is a fatal configuration error.
//!
//! Formats (`#` starts a comment, blank lines ignored):
//! - generics: `token`
//! - aliases: `raw canonical [canonical ...]` (`raw*` = prefix, `-` = delete)
//! - taxonomy: `tag CATEGORY [path]`
//! - vendor lists: `Vendor`

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::logic::labels::Tokenizer;

use super::{AliasTable, Category, GenericSet, Taxonomy};

/// Non-empty, non-comment lines with their 1-based line numbers
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(i, line)| {
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            None
        } else {
            Some((i + 1, line))
        }
    })
}

fn read_table(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// GENERICS
// ============================================================================

pub fn parse_generics(text: &str, origin: &str) -> ConfigResult<GenericSet> {
    let mut set = GenericSet::new();
    for (line_no, line) in content_lines(text) {
        let mut fields = line.split_whitespace();
        let token = fields.next().unwrap_or_default();
        if fields.next().is_some() {
            return Err(ConfigError::Syntax {
                origin: origin.to_string(),
                line: line_no,
                reason: format!("expected one token, got '{}'", line),
            });
        }
        if !set.insert(token) {
            log::warn!("{}:{}: duplicate generic token '{}'", origin, line_no, token);
        }
    }
    log::info!("Loaded {} generic tokens from {}", set.len(), origin);
    Ok(set)
}

pub fn load_generics(path: &Path) -> ConfigResult<GenericSet> {
    parse_generics(&read_table(path)?, &path.display().to_string())
}

// ============================================================================
// ALIASES
// ============================================================================

pub fn parse_aliases(text: &str, origin: &str, tokenizer: &Tokenizer) -> ConfigResult<AliasTable> {
    let mut table = AliasTable::new();
    for (line_no, line) in content_lines(text) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(ConfigError::Syntax {
                origin: origin.to_string(),
                line: line_no,
                reason: format!("alias '{}' has no expansion", line),
            });
        }
        if !table.insert_with(fields[0], &fields[1..], tokenizer) {
            log::warn!(
                "{}:{}: alias '{}' is empty or already declared, skipped",
                origin,
                line_no,
                fields[0]
            );
        }
    }
    log::info!("Loaded {} alias rules from {}", table.len(), origin);
    Ok(table)
}

pub fn load_aliases(path: &Path, tokenizer: &Tokenizer) -> ConfigResult<AliasTable> {
    parse_aliases(&read_table(path)?, &path.display().to_string(), tokenizer)
}

// ============================================================================
// TAXONOMY
// ============================================================================

pub fn parse_taxonomy(text: &str, origin: &str) -> ConfigResult<Taxonomy> {
    let mut taxonomy = Taxonomy::new();
    for (line_no, line) in content_lines(text) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 || fields.len() > 3 {
            return Err(ConfigError::Syntax {
                origin: origin.to_string(),
                line: line_no,
                reason: format!("expected 'tag CATEGORY [path]', got '{}'", line),
            });
        }
        let category: Category = fields[1].parse().map_err(|code| ConfigError::UnknownCategory {
            origin: origin.to_string(),
            line: line_no,
            code,
        })?;
        if !taxonomy.insert(fields[0], category, fields.get(2).copied()) {
            return Err(ConfigError::DuplicateTag {
                origin: origin.to_string(),
                line: line_no,
                tag: fields[0].to_lowercase(),
            });
        }
    }
    log::info!("Loaded {} taxonomy tags from {}", taxonomy.len(), origin);
    Ok(taxonomy)
}

pub fn load_taxonomy(path: &Path) -> ConfigResult<Taxonomy> {
    parse_taxonomy(&read_table(path)?, &path.display().to_string())
}

// ============================================================================
// VENDOR LISTS
// ============================================================================

/// One vendor name per line, kept verbatim (names are case-sensitive)
pub fn parse_vendor_list(text: &str) -> Vec<String> {
    let mut vendors: Vec<String> = Vec::new();
    for (_, line) in content_lines(text) {
        if !vendors.iter().any(|v| v == line) {
            vendors.push(line.to_string());
        }
    }
    vendors
}

pub fn load_vendor_list(path: &Path) -> ConfigResult<Vec<String>> {
    let vendors = parse_vendor_list(&read_table(path)?);
    log::info!("Loaded {} vendors from {}", vendors.len(), path.display());
    Ok(vendors)
}

// ============================================================================
// TESTS
// ============================================================================
