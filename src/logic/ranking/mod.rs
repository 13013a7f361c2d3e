//! Ranking Module
//!
//! Aggregates per-vendor votes into an ordered (token, count) list.

pub mod ranker;
pub mod types;

pub use ranker::Ranker;
pub use types::{format_tag_pairs, RankedTag};
