//! Sample Record
//!
//! Uniform per-sample input of the engine: identity hashes, optional
//! timestamps and one detection label per AV vendor.
//! Built by the report adapters (or by hand); never mutated by the engine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ============================================================================
// HASH SELECTOR
// ============================================================================

/// Which digest names a sample (used for singleton families and output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashKind {
    #[default]
    Md5,
    Sha1,
    Sha256,
}

impl HashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashKind::Md5 => "md5",
            HashKind::Sha1 => "sha1",
            HashKind::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(HashKind::Md5),
            "sha1" => Ok(HashKind::Sha1),
            "sha256" => Ok(HashKind::Sha256),
            _ => Err(ConfigError::InvalidSetting {
                key: "hash".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// IDENTITY
// ============================================================================

/// The three digests identifying a sample
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IdentityRepr")]
pub struct SampleIdentity {
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
}

impl SampleIdentity {
    pub fn new(md5: &str, sha1: &str, sha256: &str) -> Self {
        Self {
            md5: md5.to_lowercase(),
            sha1: sha1.to_lowercase(),
            sha256: sha256.to_lowercase(),
        }
    }

    pub fn get(&self, kind: HashKind) -> &str {
        match kind {
            HashKind::Md5 => &self.md5,
            HashKind::Sha1 => &self.sha1,
            HashKind::Sha256 => &self.sha256,
        }
    }

    /// All non-empty digests, for hash-fragment suppression
    pub fn digests(&self) -> impl Iterator<Item = &str> {
        [self.md5.as_str(), self.sha1.as_str(), self.sha256.as_str()]
            .into_iter()
            .filter(|h| !h.is_empty())
    }
}

#[derive(Deserialize)]
struct IdentityRepr {
    md5: String,
    sha1: String,
    sha256: String,
}

impl From<IdentityRepr> for SampleIdentity {
    fn from(repr: IdentityRepr) -> Self {
        Self::new(&repr.md5, &repr.sha1, &repr.sha256)
    }
}

// ============================================================================
// SAMPLE RECORD
// ============================================================================

/// One (vendor, label) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvLabel {
    pub vendor: String,
    pub label: String,
}

/// Per-sample input record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SampleRecordRepr")]
pub struct SampleRecord {
    pub identity: SampleIdentity,
    pub first_seen: Option<DateTime<Utc>>,
    pub scan_date: Option<DateTime<Utc>>,
    labels: Vec<AvLabel>,
}

impl SampleRecord {
    pub fn new(identity: SampleIdentity) -> Self {
        Self {
            identity,
            ..Default::default()
        }
    }

    pub fn with_first_seen(mut self, ts: Option<DateTime<Utc>>) -> Self {
        self.first_seen = ts;
        self
    }

    pub fn with_scan_date(mut self, ts: Option<DateTime<Utc>>) -> Self {
        self.scan_date = ts;
        self
    }

    /// Add a vendor label. A vendor already present keeps its first label.
    pub fn with_label(mut self, vendor: &str, label: &str) -> Self {
        self.push_label(vendor, label);
        self
    }

    /// Add a vendor label, returning false if the vendor was already present
    pub fn push_label(&mut self, vendor: &str, label: &str) -> bool {
        if self.labels.iter().any(|l| l.vendor == vendor) {
            log::trace!("Duplicate vendor {} ignored for {}", vendor, self.identity.md5);
            return false;
        }
        self.labels.push(AvLabel {
            vendor: vendor.to_string(),
            label: label.to_string(),
        });
        true
    }

    pub fn labels(&self) -> &[AvLabel] {
        &self.labels
    }

    pub fn has_labels(&self) -> bool {
        !self.labels.is_empty()
    }

    pub fn hash(&self, kind: HashKind) -> &str {
        self.identity.get(kind)
    }
}

/// Wire form; rebuilt through `push_label` so vendors stay unique
#[derive(Deserialize)]
struct SampleRecordRepr {
    identity: SampleIdentity,
    first_seen: Option<DateTime<Utc>>,
    scan_date: Option<DateTime<Utc>>,
    #[serde(default)]
    labels: Vec<AvLabel>,
}

impl From<SampleRecordRepr> for SampleRecord {
    fn from(repr: SampleRecordRepr) -> Self {
        let mut record = SampleRecord::new(repr.identity)
            .with_first_seen(repr.first_seen)
            .with_scan_date(repr.scan_date);
        for av in &repr.labels {
            record.push_label(&av.vendor, &av.label);
        }
        record
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> SampleIdentity {
        SampleIdentity::new("AABB", "ccdd", "eeff")
    }

    #[test]
    fn test_vendor_dedup_keeps_first() {
        let record = SampleRecord::new(identity())
            .with_label("Avira", "TR/Zbot.gen")
            .with_label("Avira", "TR/Other")
            .with_label("ESET-NOD32", "Win32/Zbot");

        assert_eq!(record.labels().len(), 2);
        assert_eq!(record.labels()[0].label, "TR/Zbot.gen");
        assert_eq!(record.labels()[1].vendor, "ESET-NOD32");
    }

    #[test]
    fn test_hash_selector() {
        let record = SampleRecord::new(identity());
        assert_eq!(record.hash(HashKind::Md5), "aabb");
        assert_eq!(record.hash(HashKind::Sha1), "ccdd");
        assert_eq!(record.hash(HashKind::Sha256), "eeff");
    }

    #[test]
    fn test_hash_kind_parse() {
        assert_eq!("SHA256".parse::<HashKind>().unwrap(), HashKind::Sha256);
        assert!("crc32".parse::<HashKind>().is_err());
    }

    #[test]
    fn test_deserialize_keeps_first_label_per_vendor() {
        let json = r#"{
            "identity": {"md5": "AABB", "sha1": "CCDD", "sha256": "EEFF"},
            "labels": [
                {"vendor": "VendorA", "label": "Win32/Zbot"},
                {"vendor": "VendorA", "label": "Trojan.Zbot.x"},
                {"vendor": "VendorB", "label": "Win32/Sality"},
                {"vendor": "VendorC", "label": "Sality.gen"}
            ]
        }"#;
        let record: SampleRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.labels().len(), 3);
        assert_eq!(record.labels()[0].label, "Win32/Zbot");
        assert_eq!(record.identity, identity());
        assert!(record.first_seen.is_none());
    }

    #[test]
    fn test_serialize_roundtrip_preserves_record() {
        let record = SampleRecord::new(identity())
            .with_label("Avira", "TR/Zbot.gen")
            .with_label("ESET-NOD32", "Win32/Zbot");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(serde_json::from_str::<SampleRecord>(&json).unwrap(), record);
    }

    #[test]
    fn test_digests_skip_empty() {
        let id = SampleIdentity::new("aa", "", "bb");
        assert_eq!(id.digests().collect::<Vec<_>>(), vec!["aa", "bb"]);
    }
}
