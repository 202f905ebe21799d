// src/lib.rs
//! Court docket field extraction.
//!
//! The core is [`extractors::extract`]: one docket page in, one flat
//! [`CaseRecord`] out. Retrieval ([`oscn`]), batch driving ([`batch`]) and
//! persistence ([`storage`]) sit around it.
pub mod batch;
pub mod extractors;
pub mod oscn;
pub mod storage;
pub mod utils;

pub use extractors::{extract, CaseRecord, DocketExtractor, ExtractorConfig, PartyCasing};
pub use utils::error::{AppError, ExtractError};
