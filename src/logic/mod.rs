//! Logic Module - Label Pipeline & Engine
//!
//! ## Architecture
//! - `sample` - Per-sample input record (hashes, timestamps, vendor labels)
//! - `tables/` - Rule tables (taxonomy, aliases, generics) and their loaders
//! - `labels/` - Vendor cleanup, tokenizer, alias resolver, generic filter
//! - `ranking/` - Vendor vote aggregation
//! - `classify/` - Family selection, PUP detection, result types
//! - `report/` - v2/v3 report adapters
//! - `engine/` - `LabelEngine` and batch processing

// Input and static rules
pub mod sample;
pub mod tables;

// Pipeline stages
pub mod labels;
pub mod ranking;
pub mod classify;

// Outer layer
pub mod report;
pub mod engine;
