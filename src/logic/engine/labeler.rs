//! Label Engine
//!
//! Runs the per-sample pipeline:
//! vendor selection -> normalizer -> tokenizer -> alias resolver ->
//! generic filter -> ranker -> classifier.
//!
//! The engine is immutable once built; one instance is shared by every
//! worker of a batch.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;

use crate::config::EngineConfig;
use crate::error::ConfigResult;
use crate::logic::classify::{classify, score_tags, LabelError, LabelReport, LabelResult};
use crate::logic::labels::{
    strip_engine_markers, strip_vendor_suffix, AliasResolver, GenericFilter,
};
use crate::logic::ranking::RankedTag;
use crate::logic::report::ReportAdapter;
use crate::logic::sample::{SampleIdentity, SampleRecord};
use crate::logic::tables::RuleTables;

#[derive(Debug, Clone)]
pub struct LabelEngine {
    config: EngineConfig,
    tables: Arc<RuleTables>,
    vendors: Option<HashSet<String>>,
}

impl LabelEngine {
    pub fn new(tables: RuleTables, config: EngineConfig) -> Self {
        let vendors = config
            .vendors
            .as_ref()
            .map(|list| list.iter().cloned().collect());
        Self {
            config,
            tables: Arc::new(tables),
            vendors,
        }
    }

    /// Load the configured rule tables and build the engine
    pub fn from_config(config: EngineConfig) -> ConfigResult<Self> {
        let tables = RuleTables::load(&config.tables, &config.tokenizer)?;
        log::info!(
            "Engine ready: {} aliases, {} generics, {} taxonomy tags",
            tables.aliases.len(),
            tables.generics.len(),
            tables.taxonomy.len()
        );
        Ok(Self::new(tables, config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    // ========================================================================
    // SAMPLE LABELING
    // ========================================================================

    /// Label one sample with the configured vendor allow-list
    pub fn label_sample(&self, record: &SampleRecord) -> LabelResult {
        self.label_sample_with_vendors(record, self.vendors.as_ref())
    }

    /// Label one sample, letting only `vendors` vote (all when `None`)
    pub fn label_sample_with_vendors(
        &self,
        record: &SampleRecord,
        vendors: Option<&HashSet<String>>,
    ) -> LabelResult {
        if !record.has_labels() {
            log::debug!("No labels for {}", record.identity.md5);
            return Err(LabelError::NoLabels {
                identity: record.identity.clone(),
                first_seen: record.first_seen,
                scan_date: record.scan_date,
            });
        }

        let ranked = self.rank_with_vendors(record, vendors);
        let verdict = classify(
            &ranked,
            &self.tables.taxonomy,
            &self.config.classifier,
            self.singleton_hash(record),
        );

        Ok(LabelReport {
            identity: record.identity.clone(),
            first_seen: record.first_seen,
            scan_date: record.scan_date,
            vt_count: record.labels().len(),
            family: verdict.family,
            is_pup: verdict.is_pup,
            tags: score_tags(&ranked, &self.tables.taxonomy),
        })
    }

    /// Ranked (token, count) list of one sample
    pub fn rank_sample(&self, record: &SampleRecord) -> Vec<RankedTag> {
        self.rank_with_vendors(record, self.vendors.as_ref())
    }

    fn rank_with_vendors(
        &self,
        record: &SampleRecord,
        vendors: Option<&HashSet<String>>,
    ) -> Vec<RankedTag> {
        let per_vendor = self.sample_tags(record, vendors);
        self.config.ranker.rank(&per_vendor)
    }

    /// Surviving canonical tokens, one list per voting vendor, in report
    /// order
    pub fn sample_tags(
        &self,
        record: &SampleRecord,
        vendors: Option<&HashSet<String>>,
    ) -> Vec<Vec<String>> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut per_vendor = Vec::with_capacity(record.labels().len());

        for av in record.labels() {
            let label = strip_engine_markers(&av.vendor, &av.label);
            if label.is_empty() {
                continue;
            }
            if vendors.is_some_and(|allowed| !allowed.contains(&av.vendor)) {
                continue;
            }
            if self.config.collapse_shared_labels && !seen.insert(label) {
                log::trace!("{}: shared label '{}' skipped", av.vendor, label);
                continue;
            }

            let tokens = self.label_tokens(&av.vendor, label, &record.identity);
            log::trace!("{}: '{}' -> {:?}", av.vendor, av.label, tokens);
            per_vendor.push(tokens);
        }

        per_vendor
    }

    /// Canonical, non-generic tokens of a single vendor label
    pub fn label_tokens(&self, vendor: &str, label: &str, identity: &SampleIdentity) -> Vec<String> {
        let label = if self.config.vendor_rules {
            strip_vendor_suffix(vendor, strip_engine_markers(vendor, label))
        } else {
            label.trim()
        };

        let raw = self.config.tokenizer.tokenize_for(label, identity);
        let canonical = AliasResolver::new(&self.tables.aliases).resolve_sequence(&raw);
        GenericFilter::new(&self.tables.generics)
            .with_taxonomy(&self.tables.taxonomy)
            .apply(canonical)
    }

    /// Configured digest, or the first available one when it is missing
    fn singleton_hash<'r>(&self, record: &'r SampleRecord) -> &'r str {
        let hash = record.hash(self.config.hash_kind);
        if !hash.is_empty() {
            return hash;
        }
        record.identity.digests().next().unwrap_or(hash)
    }

    // ========================================================================
    // REPORTS
    // ========================================================================

    /// Parse a report with `adapter` and label it
    pub fn label_report(&self, adapter: &dyn ReportAdapter, report: &Value) -> LabelResult {
        let record = adapter.parse(report)?;
        self.label_sample(&record)
    }

    /// Same as `label_report`, from one line of JSON text
    pub fn label_report_str(&self, adapter: &dyn ReportAdapter, text: &str) -> LabelResult {
        let record = adapter.parse_str(text)?;
        self.label_sample(&record)
    }
}
