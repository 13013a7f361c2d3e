//! v2 Report Adapter
//!
//! Flat reports: `md5`, `sha1`, `sha256`, `scan_date`, `first_seen` and a
//! `scans` object keyed by vendor.

use serde_json::Value;

use super::types::{clean_label, parse_v2_date, required_object, required_str, V2ScanResult};
use super::{ReportAdapter, ReportVersion};
use crate::error::ReportError;
use crate::logic::sample::{SampleIdentity, SampleRecord};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportV2Adapter;

impl ReportAdapter for ReportV2Adapter {
    fn version(&self) -> ReportVersion {
        ReportVersion::V2
    }

    fn parse(&self, report: &Value) -> Result<SampleRecord, ReportError> {
        let scans = required_object(report, "scans")?;
        let identity = SampleIdentity::new(
            required_str(report, "md5")?,
            required_str(report, "sha1")?,
            required_str(report, "sha256")?,
        );

        let mut record = SampleRecord::new(identity)
            .with_first_seen(parse_v2_date(report.get("first_seen")))
            .with_scan_date(parse_v2_date(report.get("scan_date")));

        for (vendor, entry) in scans {
            let scan: V2ScanResult = match serde_json::from_value(entry.clone()) {
                Ok(scan) => scan,
                Err(e) => {
                    log::debug!("Skipping malformed scan entry for {}: {}", vendor, e);
                    continue;
                }
            };
            if !scan.detected {
                continue;
            }
            if let Some(label) = scan.result {
                record.push_label(vendor, &clean_label(&label));
            }
        }

        Ok(record)
    }
}
