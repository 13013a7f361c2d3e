//! avlabel - normalized malware family names from antivirus labels
//!
//! Given the labels several AV engines assign to one sample, the engine
//! tokenizes them, maps vendor aliases to canonical tokens, drops generic
//! words, ranks what remains by vendor agreement and picks a family plus a
//! PUP flag.

pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use config::{EngineConfig, TablePaths};
pub use error::{ConfigError, ConfigResult, ReportError};
pub use logic::classify::{Family, LabelError, LabelRecord, LabelReport, LabelResult};
pub use logic::engine::{BatchSummary, LabelEngine};
pub use logic::report::{ReportAdapter, ReportVersion};
pub use logic::sample::{HashKind, SampleIdentity, SampleRecord};
