// src/extractors/case_type.rs
use crate::extractors::patterns::{FieldPattern, CASE_TYPE_NOT_FOUND};
use once_cell::sync::Lazy;

// Case number marker, parenthesised category, then the filing date.
static CASE_TYPE_PATTERN: Lazy<FieldPattern> = Lazy::new(|| {
    FieldPattern::new("case_type", r"(?s)No\..*\((.*)\).*Filed:\s\d", CASE_TYPE_NOT_FOUND)
        .expect("Failed to compile CASE_TYPE_PATTERN")
});

/// Category text exactly as it appears between the parentheses.
pub fn extract_case_type(text: &str) -> String {
    CASE_TYPE_PATTERN.extract(text)
}
