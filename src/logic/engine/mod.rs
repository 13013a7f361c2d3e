//! Engine Module
//!
//! Wires rule tables, label pipeline, ranker and classifier together.
//!
//! ## Structure
//! - `labeler`: `LabelEngine`, one sample at a time
//! - `batch`: parallel batches and their summary
//!
//! ## Usage
//! ```ignore
//! let engine = LabelEngine::from_config(EngineConfig::from_env()?)?;
//! let result = engine.label_report(ReportVersion::V3.adapter(), &json);
//! println!("{}", LabelRecord::from_result(&result).family.unwrap_or_default());
//! ```

pub mod batch;
pub mod labeler;

pub use batch::BatchSummary;
pub use labeler::LabelEngine;
