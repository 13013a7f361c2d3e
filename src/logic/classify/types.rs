//! Classification Types
//!
//! Result types of the engine. Data only - no logic beyond rendering.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::constants::{
    NO_LABELS_MSG, PARSER_ERROR_MSG, SINGLETON_PREFIX, STATUS_ERROR, STATUS_OK, SUCCESS_MSG,
};
use crate::error::ReportError;
use crate::logic::sample::SampleIdentity;
use crate::logic::tables::Category;

// ============================================================================
// FAMILY
// ============================================================================

/// Chosen family of a sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Family {
    /// A ranked canonical token
    Named(String),
    /// No informative token survived; carries the naming hash
    Singleton(String),
}

impl Family {
    pub fn is_singleton(&self) -> bool {
        matches!(self, Family::Singleton(_))
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Named(name) => f.write_str(name),
            Family::Singleton(hash) => write!(f, "{}:{}", SINGLETON_PREFIX, hash),
        }
    }
}

impl Serialize for Family {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// VERDICT
// ============================================================================

/// Classifier output for one ranked list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub family: Family,
    pub is_pup: bool,
}

/// Ranked tag enriched with its taxonomy entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredTag {
    pub tag: String,
    pub count: usize,
    pub category: Category,
    pub path: String,
}

// ============================================================================
// RESULT
// ============================================================================

/// Successful extraction for one sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelReport {
    pub identity: SampleIdentity,
    pub first_seen: Option<DateTime<Utc>>,
    pub scan_date: Option<DateTime<Utc>>,
    /// Number of vendor labels in the record
    pub vt_count: usize,
    pub family: Family,
    pub is_pup: bool,
    pub tags: Vec<ScoredTag>,
}

impl LabelReport {
    /// `path|count` entries joined by commas
    pub fn tags_summary(&self) -> String {
        self.tags
            .iter()
            .map(|t| format!("{}|{}", t.path, t.count))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Per-sample failure. Never interrupts a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelError {
    #[error("Cannot parse report: {0}")]
    Parser(#[from] ReportError),

    #[error("No AV labels in report.")]
    NoLabels {
        identity: SampleIdentity,
        first_seen: Option<DateTime<Utc>>,
        scan_date: Option<DateTime<Utc>>,
    },
}

impl LabelError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LabelError::Parser(_) => StatusCode::ParserError,
            LabelError::NoLabels { .. } => StatusCode::NoLabels,
        }
    }
}

pub type LabelResult = Result<LabelReport, LabelError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusCode {
    Success,
    ParserError,
    NoLabels,
}

impl StatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Success => "success",
            StatusCode::ParserError => "parser-error",
            StatusCode::NoLabels => "no-labels",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StatusCode::Success => SUCCESS_MSG,
            StatusCode::ParserError => PARSER_ERROR_MSG,
            StatusCode::NoLabels => NO_LABELS_MSG,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FLAT OUTPUT RECORD
// ============================================================================

/// Flat, serializable view of a `LabelResult` (one JSON line per sample)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRecord {
    pub md5: Option<String>,
    pub sha1: Option<String>,
    pub sha256: Option<String>,
    pub first_seen: Option<DateTime<Utc>>,
    pub scan_date: Option<DateTime<Utc>>,
    pub vt_count: Option<usize>,
    pub family: Option<String>,
    pub is_pup: Option<bool>,
    pub tags: Option<String>,
    pub status: &'static str,
    pub status_code: StatusCode,
    pub msg: &'static str,
    pub verbose_msg: String,
}

impl LabelRecord {
    pub fn from_result(result: &LabelResult) -> Self {
        match result {
            Ok(report) => Self {
                md5: Some(report.identity.md5.clone()),
                sha1: Some(report.identity.sha1.clone()),
                sha256: Some(report.identity.sha256.clone()),
                first_seen: report.first_seen,
                scan_date: report.scan_date,
                vt_count: Some(report.vt_count),
                family: Some(report.family.to_string()),
                is_pup: Some(report.is_pup),
                tags: Some(report.tags_summary()),
                status: STATUS_OK,
                status_code: StatusCode::Success,
                msg: SUCCESS_MSG,
                verbose_msg: SUCCESS_MSG.to_string(),
            },
            Err(err) => {
                let code = err.status_code();
                let (identity, first_seen, scan_date) = match err {
                    LabelError::NoLabels {
                        identity,
                        first_seen,
                        scan_date,
                    } => (Some(identity), *first_seen, *scan_date),
                    LabelError::Parser(_) => (None, None, None),
                };
                Self {
                    md5: identity.map(|id| id.md5.clone()),
                    sha1: identity.map(|id| id.sha1.clone()),
                    sha256: identity.map(|id| id.sha256.clone()),
                    first_seen,
                    scan_date,
                    vt_count: None,
                    family: None,
                    is_pup: None,
                    tags: None,
                    status: STATUS_ERROR,
                    status_code: code,
                    msg: code.message(),
                    verbose_msg: err.to_string(),
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_display() {
        assert_eq!(Family::Named("zbot".into()).to_string(), "zbot");
        assert_eq!(Family::Singleton("abcd".into()).to_string(), "SINGLETON:abcd");
        assert_eq!(serde_json::to_string(&Family::Named("zbot".into())).unwrap(), "\"zbot\"");
    }

    #[test]
    fn test_parser_error_record_has_no_identity() {
        let result: LabelResult = Err(LabelError::Parser(ReportError::MissingField("md5")));
        let record = LabelRecord::from_result(&result);
        assert_eq!(record.status, STATUS_ERROR);
        assert_eq!(record.status_code, StatusCode::ParserError);
        assert_eq!(record.msg, PARSER_ERROR_MSG);
        assert!(record.md5.is_none() && record.sha1.is_none() && record.sha256.is_none());
        assert!(record.family.is_none());
    }

    #[test]
    fn test_no_labels_record_keeps_identity() {
        let result: LabelResult = Err(LabelError::NoLabels {
            identity: SampleIdentity::new("aa", "bb", "cc"),
            first_seen: None,
            scan_date: None,
        });
        let record = LabelRecord::from_result(&result);
        assert_eq!(record.status_code, StatusCode::NoLabels);
        assert_eq!(record.md5.as_deref(), Some("aa"));
        assert!(record.family.is_none());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status_code"], "no-labels");
    }
}
