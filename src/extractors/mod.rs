// src/extractors/mod.rs
pub mod case_type;
pub mod dates;
pub mod docket;
pub mod document;
pub mod judgment;
pub mod parties;
pub mod patterns;

// Re-export key extraction types for convenience
pub use docket::{extract, CaseRecord, DocketExtractor, ExtractorConfig};
pub use document::{CaseStyle, ParsedDocument};
pub use parties::{Parties, PartyCasing};
pub use patterns::FieldPattern;
