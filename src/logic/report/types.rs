//! Report Types
//!
//! Per-engine entries of the two report schemas plus the JSON helpers the
//! adapters share.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ReportError;

/// Timestamp layout of v2 reports
pub const V2_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// ENGINE ENTRIES
// ============================================================================

/// One entry of a v2 `scans` object (other engine fields are ignored)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct V2ScanResult {
    pub detected: bool,
    pub result: Option<String>,
}

/// One entry of a v3 `last_analysis_results` object. Any string `result`
/// is a label, whatever the engine's `category`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct V3EngineResult {
    pub result: Option<String>,
}

// ============================================================================
// HELPERS
// ============================================================================

pub fn required_str<'v>(obj: &'v Value, field: &'static str) -> Result<&'v str, ReportError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ReportError::MissingField(field)),
        Some(value) => value.as_str().ok_or(ReportError::InvalidField {
            field,
            expected: "string",
        }),
    }
}

pub fn required_object<'v>(
    obj: &'v Value,
    field: &'static str,
) -> Result<&'v Map<String, Value>, ReportError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ReportError::MissingField(field)),
        Some(value) => value.as_object().ok_or(ReportError::InvalidField {
            field,
            expected: "object",
        }),
    }
}

/// Keep printable ASCII only, then trim
pub fn clean_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_graphic() || c.is_ascii_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// `YYYY-MM-DD HH:MM:SS`, read as UTC
pub fn parse_v2_date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let text = value?.as_str()?;
    match NaiveDateTime::parse_from_str(text.trim(), V2_DATE_FORMAT) {
        Ok(naive) => Some(naive.and_utc()),
        Err(e) => {
            log::debug!("Ignoring unparseable date '{}': {}", text, e);
            None
        }
    }
}

/// Epoch seconds
pub fn parse_epoch(value: Option<&Value>) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value?.as_i64()?, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_label() {
        assert_eq!(clean_label("  Trojan.Zbot\u{00e9}\u{0007} "), "Trojan.Zbot");
    }

    #[test]
    fn test_required_fields() {
        let v = json!({"md5": "aa", "sha1": 5, "sha256": null});
        assert_eq!(required_str(&v, "md5").unwrap(), "aa");
        assert_eq!(
            required_str(&v, "sha1").unwrap_err(),
            ReportError::InvalidField { field: "sha1", expected: "string" }
        );
        assert_eq!(required_str(&v, "sha256").unwrap_err(), ReportError::MissingField("sha256"));
    }

    #[test]
    fn test_engine_entries_ignore_extra_fields() {
        let v2: V2ScanResult = serde_json::from_value(
            json!({"detected": true, "result": "Win32/Zbot", "version": "9", "update": "20130530"}),
        )
        .unwrap();
        assert!(v2.detected);
        assert_eq!(v2.result.as_deref(), Some("Win32/Zbot"));

        let v3: V3EngineResult = serde_json::from_value(
            json!({"category": "type-unsupported", "engine_name": "X", "result": null}),
        )
        .unwrap();
        assert!(v3.result.is_none());
    }

    #[test]
    fn test_dates() {
        let ts = parse_v2_date(Some(&json!("2013-05-30 12:34:56"))).unwrap();
        assert_eq!(ts.timestamp(), 1369917296);
        assert!(parse_v2_date(Some(&json!("yesterday"))).is_none());
        assert_eq!(parse_epoch(Some(&json!(1369917296))), Some(ts));
        assert!(parse_epoch(None).is_none());
    }
}
