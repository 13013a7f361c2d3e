//! Classify Module
//!
//! Picks the final family and PUP flag from a ranked tag list.
//!
//! ## Structure
//! - `types`: Family, Verdict, LabelReport, LabelError, LabelRecord
//! - `rules`: PupPolicy / ClassifierPolicy
//! - `classifier`: selection logic
//!
//! ## Usage
//! ```ignore
//! use avlabel::logic::classify::{classify, ClassifierPolicy};
//!
//! let verdict = classify(&ranked, &taxonomy, &ClassifierPolicy::default(), md5);
//! println!("{} pup={}", verdict.family, verdict.is_pup);
//! ```

pub mod classifier;
pub mod rules;
pub mod types;

pub use classifier::{classify, is_pup, leading_window, score_tags, select_family};
pub use rules::{ClassifierPolicy, PupPolicy};
pub use types::{
    Family, LabelError, LabelRecord, LabelReport, LabelResult, ScoredTag, StatusCode, Verdict,
};
