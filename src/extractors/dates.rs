// src/extractors/dates.rs
use crate::extractors::patterns::{FieldPattern, FIELD_NOT_FOUND};
use once_cell::sync::Lazy;

static FILED_PATTERN: Lazy<FieldPattern> = Lazy::new(|| {
    FieldPattern::new("filed_date", r"Filed:\s(\d\d/\d\d/\d\d\d\d)", FIELD_NOT_FOUND)
        .expect("Failed to compile FILED_PATTERN")
});

static CLOSED_PATTERN: Lazy<FieldPattern> = Lazy::new(|| {
    FieldPattern::new("closed_date", r"Closed:\s(\d\d/\d\d/\d\d\d\d)", FIELD_NOT_FOUND)
        .expect("Failed to compile CLOSED_PATTERN")
});

static JUDGE_PATTERN: Lazy<FieldPattern> = Lazy::new(|| {
    FieldPattern::new("judge", r"(?s)Filed:.*Judge:(.*)", FIELD_NOT_FOUND).expect("Failed to compile JUDGE_PATTERN")
});

/// `MM/DD/YYYY` after the first `Filed: ` in the document text.
pub fn extract_filed_date(text: &str) -> String {
    FILED_PATTERN.extract(text)
}

/// `MM/DD/YYYY` after the first `Closed: ` in the document text.
pub fn extract_closed_date(text: &str) -> String {
    CLOSED_PATTERN.extract(text)
}

/// Judge name from the case style block text, line breaks removed.
pub fn extract_judge(style_block_text: &str) -> String {
    JUDGE_PATTERN.extract_with(style_block_text, |judge| {
        judge.replace(['\r', '\n'], "").trim().to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filed_without_closed() {
        let text = "No. SC-2020-5 (Small Claims)\nFiled: 01/02/2020\n";
        assert_eq!(extract_filed_date(text), "01/02/2020");
        assert_eq!(extract_closed_date(text), "Not found");
    }

    #[test]
    fn test_both_dates() {
        let text = "Filed: 01/02/2020\nClosed: 11/30/2021";
        assert_eq!(extract_filed_date(text), "01/02/2020");
        assert_eq!(extract_closed_date(text), "11/30/2021");
    }

    #[test]
    fn test_short_date_is_not_matched() {
        assert_eq!(extract_filed_date("Filed: 1/2/2020"), "Not found");
    }

    #[test]
    fn test_judge_joins_lines() {
        let block = "No. CJ-2020-1\n(Contract)\nFiled: 01/02/2020\n\nJudge:\n  Smith,\n JOHN\n";
        assert_eq!(extract_judge(block), "Smith, JOHN");
    }

    #[test]
    fn test_judge_requires_filed_marker() {
        assert_eq!(extract_judge("Judge: Smith"), "Not found");
    }
}
