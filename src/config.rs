//! Configuration module
//!
//! One `EngineConfig` is built at startup (defaults, environment, JSON file
//! or CLI flags) and handed to the engine. There is no process-wide state.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ConfigError, ConfigResult};
use crate::logic::classify::ClassifierPolicy;
use crate::logic::labels::Tokenizer;
use crate::logic::ranking::Ranker;
use crate::logic::sample::HashKind;

// ============================================================================
// TABLE PATHS
// ============================================================================

/// Rule table files. `None` selects the embedded default table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablePaths {
    pub generics: Option<PathBuf>,
    pub aliases: Option<PathBuf>,
    pub taxonomy: Option<PathBuf>,
}

// ============================================================================
// ENGINE CONFIG
// ============================================================================

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tables: TablePaths,

    /// Digest used to name singleton families
    pub hash_kind: HashKind,

    pub tokenizer: Tokenizer,

    pub ranker: Ranker,

    pub classifier: ClassifierPolicy,

    /// Apply vendor-specific suffix cleanup before tokenizing
    pub vendor_rules: bool,

    /// Skip a label identical to one already reported by another vendor
    pub collapse_shared_labels: bool,

    /// Only these vendors vote (all vendors when `None`)
    pub vendors: Option<Vec<String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tables: TablePaths::default(),
            hash_kind: HashKind::default(),
            tokenizer: Tokenizer::default(),
            ranker: Ranker::default(),
            classifier: ClassifierPolicy::default(),
            vendor_rules: true,
            collapse_shared_labels: true,
            vendors: None,
        }
    }
}

impl EngineConfig {
    /// Classic AVClass behaviour: 4-char tokens, variant digits folded,
    /// tokens seen by a single vendor dropped
    pub fn avclass_compat() -> Self {
        Self {
            tokenizer: Tokenizer::new(4).with_trailing_digits_stripped(true),
            ranker: Ranker::new(2),
            ..Default::default()
        }
    }

    pub fn with_vendors<I, S>(mut self, vendors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vendors = Some(vendors.into_iter().map(Into::into).collect());
        self
    }

    /// Load configuration from environment variables, on top of defaults
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();

        config.tables.generics = env_path(ENV_GENERICS_FILE);
        config.tables.aliases = env_path(ENV_ALIASES_FILE);
        config.tables.taxonomy = env_path(ENV_TAXONOMY_FILE);

        if let Some(kind) = env_parse::<HashKind>(ENV_HASH_KIND)? {
            config.hash_kind = kind;
        }
        if let Some(n) = env_parse::<usize>(ENV_MIN_AGREEMENT)? {
            config.ranker.min_agreement = n;
        }
        if let Some(n) = env_parse::<usize>(ENV_PUP_LEADING)? {
            config.classifier.pup.leading_tokens = n;
        }
        if let Some(flag) = env_flag(ENV_VENDOR_RULES)? {
            config.vendor_rules = flag;
        }
        if let Some(flag) = env_flag(ENV_COLLAPSE_SHARED)? {
            config.collapse_shared_labels = flag;
        }

        Ok(config)
    }

    /// Load configuration from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| ConfigError::Syntax {
            origin: path.display().to_string(),
            line: e.line(),
            reason: e.to_string(),
        })
    }
}

// ============================================================================
// ENV HELPERS
// ============================================================================

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

fn env_parse<T: FromStr>(key: &str) -> ConfigResult<Option<T>> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidSetting {
                key: key.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

fn env_flag(key: &str) -> ConfigResult<Option<bool>> {
    match env::var(key) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidSetting {
                key: key.to_string(),
                value,
            }),
        },
        Err(_) => Ok(None),
    }
}

// ============================================================================
// TESTS
// ============================================================================
