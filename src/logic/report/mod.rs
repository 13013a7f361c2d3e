//! Report Module
//!
//! Adapters from scan-report JSON to `SampleRecord`.
//!
//! # Components
//! - `v2.rs`: flat reports with a `scans` object
//! - `v3.rs`: `data.attributes` file objects
//! - `types.rs`: engine entries and JSON helpers

pub mod types;
pub mod v2;
pub mod v3;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, ReportError};
use crate::logic::sample::SampleRecord;

pub use v2::ReportV2Adapter;
pub use v3::ReportV3Adapter;

// ============================================================================
// ADAPTER TRAIT
// ============================================================================

/// Turns one report into a sample record
pub trait ReportAdapter: Send + Sync {
    fn version(&self) -> ReportVersion;

    fn parse(&self, report: &Value) -> Result<SampleRecord, ReportError>;

    /// Parse one JSON document (e.g. a JSON-lines row)
    fn parse_str(&self, text: &str) -> Result<SampleRecord, ReportError> {
        let value: Value = serde_json::from_str(text)?;
        self.parse(&value)
    }
}

// ============================================================================
// VERSION SELECTOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportVersion {
    V2,
    #[default]
    V3,
}

impl ReportVersion {
    pub fn adapter(&self) -> &'static dyn ReportAdapter {
        match self {
            ReportVersion::V2 => &ReportV2Adapter,
            ReportVersion::V3 => &ReportV3Adapter,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportVersion::V2 => "v2",
            ReportVersion::V3 => "v3",
        }
    }
}

impl fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v2" | "2" => Ok(ReportVersion::V2),
            "v3" | "3" => Ok(ReportVersion::V3),
            _ => Err(ConfigError::InvalidSetting {
                key: "api".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
