//! v3 Report Adapter
//!
//! File objects with everything under `attributes`. API responses wrap the
//! object in a `data` envelope, file-feed lines do not; both are accepted.

use serde_json::Value;

use super::types::{clean_label, parse_epoch, required_object, required_str, V3EngineResult};
use super::{ReportAdapter, ReportVersion};
use crate::error::ReportError;
use crate::logic::sample::{SampleIdentity, SampleRecord};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportV3Adapter;

impl ReportAdapter for ReportV3Adapter {
    fn version(&self) -> ReportVersion {
        ReportVersion::V3
    }

    fn parse(&self, report: &Value) -> Result<SampleRecord, ReportError> {
        let object = report.get("data").unwrap_or(report);
        let attributes = object
            .get("attributes")
            .filter(|a| a.is_object())
            .ok_or(ReportError::MissingField("attributes"))?;

        let results = required_object(attributes, "last_analysis_results")?;
        let identity = SampleIdentity::new(
            required_str(attributes, "md5")?,
            required_str(attributes, "sha1")?,
            required_str(attributes, "sha256")?,
        );

        let mut record = SampleRecord::new(identity)
            .with_first_seen(parse_epoch(attributes.get("first_submission_date")))
            .with_scan_date(parse_epoch(attributes.get("last_analysis_date")));

        for (vendor, entry) in results {
            let result: V3EngineResult = match serde_json::from_value(entry.clone()) {
                Ok(result) => result,
                Err(e) => {
                    log::debug!("Skipping malformed engine result for {}: {}", vendor, e);
                    continue;
                }
            };
            if let Some(label) = result.result {
                record.push_label(vendor, &clean_label(&label));
            }
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attributes() -> Value {
        json!({
            "md5": "aa11",
            "sha1": "bb22",
            "sha256": "cc33",
            "first_submission_date": 1369917296,
            "last_analysis_date": 1369920000,
            "last_analysis_results": {
                "ESET-NOD32": {"category": "malicious", "engine_name": "ESET-NOD32", "result": "Win32/Zbot"},
                "ClamAV": {"category": "undetected", "engine_name": "ClamAV", "result": null},
                "Microsoft": {"category": "malicious", "engine_name": "Microsoft", "result": "PWS:Win32/Zbot"}
            }
        })
    }

    #[test]
    fn test_parse_with_envelope() {
        let report = json!({"data": {"id": "cc33", "type": "file", "attributes": attributes()}});
        let record = ReportV3Adapter.parse(&report).unwrap();

        assert_eq!(record.identity.sha256, "cc33");
        assert_eq!(record.first_seen.unwrap().timestamp(), 1369917296);
        assert_eq!(record.labels().len(), 2);
        assert_eq!(record.labels()[0].vendor, "ESET-NOD32");
        assert_eq!(record.labels()[1].label, "PWS:Win32/Zbot");
    }

    #[test]
    fn test_parse_feed_line_without_envelope() {
        let report = json!({"id": "cc33", "attributes": attributes()});
        assert!(ReportV3Adapter.parse(&report).is_ok());
    }

    #[test]
    fn test_missing_attributes() {
        let report = json!({"data": {"id": "x"}});
        assert_eq!(
            ReportV3Adapter.parse(&report).unwrap_err(),
            ReportError::MissingField("attributes")
        );
    }

    #[test]
    fn test_missing_results() {
        let report = json!({"attributes": {"md5": "a", "sha1": "b", "sha256": "c"}});
        assert_eq!(
            ReportV3Adapter.parse(&report).unwrap_err(),
            ReportError::MissingField("last_analysis_results")
        );
    }
}
