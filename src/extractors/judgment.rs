// src/extractors/judgment.rs
use crate::extractors::document::ParsedDocument;
use crate::extractors::patterns::{
    FieldPattern, DISPOSITION_NOT_FOUND, DISPOSITION_PENDING, DISPOSITION_UNREADABLE, MULTI_VALUE_JOINER,
};
use once_cell::sync::Lazy;
use scraper::Selector;

/// Literal that appears in the page text once any disposition is recorded.
pub const DISPOSED_MARKER: &str = "Disposed:";

// Dispositions are rendered in red.
static DISPOSITION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"font[color="red"]"#).expect("Failed to compile DISPOSITION_SELECTOR")
});

static DISPOSED_PATTERN: Lazy<FieldPattern> = Lazy::new(|| {
    FieldPattern::new("judgment", r"(?s)Disposed:(.*?),", DISPOSITION_NOT_FOUND)
        .expect("Failed to compile DISPOSED_PATTERN")
});

/// Judgment column: pending, a single disposition, or every disposition joined in page order.
pub fn extract_judgment(document: &ParsedDocument) -> String {
    if !document.text().contains(DISPOSED_MARKER) {
        return DISPOSITION_PENDING.to_string();
    }

    let entries = document.select_texts(&DISPOSITION_SELECTOR);
    match entries.as_slice() {
        [] => {
            tracing::warn!("'{}' present but no highlighted disposition entries", DISPOSED_MARKER);
            DISPOSITION_NOT_FOUND.to_string()
        }
        [only] => DISPOSED_PATTERN.extract_with(only, |v| v.trim().to_string()),
        many => {
            tracing::debug!("Found {} disposition entries", many.len());
            many.iter()
                .map(|entry| {
                    DISPOSED_PATTERN
                        .capture(entry)
                        .map(|v| v.trim().to_string())
                        .unwrap_or_else(|| DISPOSITION_UNREADABLE.to_string())
                })
                .collect::<Vec<_>>()
                .join(MULTI_VALUE_JOINER)
        }
    }
}
