//! Central Configuration Constants
//!
//! Single source of truth for engine defaults and result messages.
//! To change a default policy value, only edit this file.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "avlabel";

// ============================================
// Result messages
// ============================================

/// Message attached to a sample with no usable AV labels
pub const NO_LABELS_MSG: &str = "No AV labels in report.";

/// Message attached to a report the adapter could not read
pub const PARSER_ERROR_MSG: &str = "Cannot parse report.";

/// Message attached to a successful extraction
pub const SUCCESS_MSG: &str = "Successfully extracted family labels.";

/// Status string for a successful extraction
pub const STATUS_OK: &str = "OK";

/// Status string for any per-sample failure
pub const STATUS_ERROR: &str = "ERROR";

/// Prefix of the synthetic family given to samples without an informative token
pub const SINGLETON_PREFIX: &str = "SINGLETON";

// ============================================
// Pipeline defaults
// ============================================

/// Tokens shorter than this are noise (single characters)
pub const DEFAULT_MIN_TOKEN_LEN: usize = 2;

/// Tokens shorter than this are never checked against the sample hashes
pub const HASH_PREFIX_MIN_LEN: usize = 4;

/// Minimum number of agreeing vendors for a token to be ranked
pub const DEFAULT_MIN_AGREEMENT: usize = 1;

/// Number of leading ranked tokens inspected by the PUP detector
pub const DEFAULT_PUP_LEADING_TOKENS: usize = 1;

/// Taxonomy path prefix that marks grayware classes as PUP indicators
pub const DEFAULT_PUP_PATH_PREFIX: &str = "CLASS:grayware";

// ============================================
// Environment variables (see `EngineConfig::from_env`)
// ============================================

pub const ENV_GENERICS_FILE: &str = "AVLABEL_GENERICS";
pub const ENV_ALIASES_FILE: &str = "AVLABEL_ALIASES";
pub const ENV_TAXONOMY_FILE: &str = "AVLABEL_TAXONOMY";
pub const ENV_HASH_KIND: &str = "AVLABEL_HASH";
pub const ENV_MIN_AGREEMENT: &str = "AVLABEL_MIN_AGREEMENT";
pub const ENV_PUP_LEADING: &str = "AVLABEL_PUP_LEADING";
pub const ENV_VENDOR_RULES: &str = "AVLABEL_VENDOR_RULES";
pub const ENV_COLLAPSE_SHARED: &str = "AVLABEL_COLLAPSE_SHARED";
