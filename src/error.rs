//! Error handling
//!
//! Load-time errors are fatal for the whole engine. Report errors only ever
//! fail the one sample they belong to (see `logic::classify::LabelError`).

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A rule table or setting could not be loaded. Aborts engine initialization.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin}:{line}: {reason}")]
    Syntax {
        origin: String,
        line: usize,
        reason: String,
    },

    #[error("{origin}:{line}: unknown taxonomy category '{code}'")]
    UnknownCategory {
        origin: String,
        line: usize,
        code: String,
    },

    #[error("{origin}:{line}: tag '{tag}' already declared in taxonomy")]
    DuplicateTag {
        origin: String,
        line: usize,
        tag: String,
    },

    #[error("invalid value for {key}: '{value}'")]
    InvalidSetting { key: String, value: String },
}

/// A scan report could not be turned into a sample record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("malformed JSON: {0}")]
    Json(String),

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' has unexpected type (expected {expected})")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Json(err.to_string())
    }
}
