//! Batch Labeling
//!
//! Samples are independent, so a batch is a plain `par_iter` over the input.
//! Results come back in input order and a failed sample never stops the
//! others.

use rayon::prelude::*;
use serde::Serialize;

use super::labeler::LabelEngine;
use crate::logic::classify::{LabelError, LabelResult};
use crate::logic::report::ReportAdapter;
use crate::logic::sample::SampleRecord;

impl LabelEngine {
    pub fn label_batch(&self, records: &[SampleRecord]) -> Vec<LabelResult> {
        records
            .par_iter()
            .map(|record| self.label_sample(record))
            .collect()
    }

    /// Label JSON-lines reports; each line is one report
    pub fn label_report_batch<S>(&self, adapter: &dyn ReportAdapter, lines: &[S]) -> Vec<LabelResult>
    where
        S: AsRef<str> + Sync,
    {
        lines
            .par_iter()
            .map(|line| self.label_report_str(adapter, line.as_ref()))
            .collect()
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Outcome counts of one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub labeled: usize,
    pub singletons: usize,
    pub pup: usize,
    pub no_labels: usize,
    pub parser_errors: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[LabelResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Default::default()
        };
        for result in results {
            match result {
                Ok(report) => {
                    summary.labeled += 1;
                    if report.family.is_singleton() {
                        summary.singletons += 1;
                    }
                    if report.is_pup {
                        summary.pup += 1;
                    }
                }
                Err(LabelError::NoLabels { .. }) => summary.no_labels += 1,
                Err(LabelError::Parser(_)) => summary.parser_errors += 1,
            }
        }
        summary
    }

    /// Labeled samples that got a named family
    pub fn named(&self) -> usize {
        self.labeled - self.singletons
    }
}
