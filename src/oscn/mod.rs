// src/oscn/mod.rs
pub mod client;
pub mod models;

pub use client::{ClientConfig, OscnClient};
pub use models::{CaseNumberRange, CaseQuery};
