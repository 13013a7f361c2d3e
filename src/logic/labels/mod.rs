//! Labels Module
//!
//! Turns one vendor label into the canonical tokens it votes for.
//!
//! ## Structure
//! - `vendor`: engine-specific label cleanup
//! - `tokenizer`: label -> raw tokens
//! - `resolver`: raw tokens -> canonical tokens (alias table)
//! - `filter`: drops generic canonical tokens
//!
//! ## Usage
//! ```ignore
//! let raw = tokenizer.tokenize_for(&normalize_label(vendor, label), &identity);
//! let canonical = AliasResolver::new(&tables.aliases).resolve_sequence(&raw);
//! let votes = GenericFilter::new(&tables.generics).apply(canonical);
//! ```

pub mod filter;
pub mod resolver;
pub mod tokenizer;
pub mod vendor;

pub use filter::GenericFilter;
pub use resolver::AliasResolver;
pub use tokenizer::Tokenizer;
pub use vendor::{normalize_label, strip_engine_markers, strip_vendor_suffix};
