// src/extractors/patterns.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use regex::Regex;

// --- Sentinels ---
pub const CASE_TYPE_NOT_FOUND: &str = "Not Found";
pub const DISPOSITION_PENDING: &str = "Disposition Pending";
pub const DISPOSITION_NOT_FOUND: &str = "Not Found";
pub const DISPOSITION_UNREADABLE: &str = "Error Reading Disposition";
pub const FIELD_NOT_FOUND: &str = "Not found";

/// Joins repeated values (dispositions, co-parties) into one flat column.
pub const MULTI_VALUE_JOINER: &str = " && ";

/// A compiled pattern for one record field together with the value used when it misses.
///
/// The first capture group is the field value.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    field: &'static str,
    regex: Regex,
    sentinel: &'static str,
}

impl FieldPattern {
    pub fn new(field: &'static str, pattern: &str, sentinel: &'static str) -> Result<Self, ExtractError> {
        let regex = Regex::new(pattern)
            .map_err(|e| ExtractError::RegexError(format!("{} pattern '{}': {}", field, pattern, e)))?;
        Ok(Self { field, regex, sentinel })
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn sentinel(&self) -> &'static str {
        self.sentinel
    }

    /// Returns the first capture group of the first match, if any.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Captured text verbatim, or the sentinel.
    pub fn extract(&self, text: &str) -> String {
        self.extract_with(text, str::to_string)
    }

    /// Captured text passed through `clean`, or the sentinel.
    pub fn extract_with(&self, text: &str, clean: impl FnOnce(&str) -> String) -> String {
        match self.capture(text) {
            Some(value) => {
                tracing::trace!("{} matched: '{}'", self.field, value);
                clean(value)
            }
            None => {
                tracing::debug!("{} not matched, using sentinel '{}'", self.field, self.sentinel);
                self.sentinel.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_and_sentinel() {
        let pattern = FieldPattern::new("closed_date", r"Closed:\s(\d\d/\d\d/\d\d\d\d)", FIELD_NOT_FOUND).unwrap();

        assert_eq!(pattern.extract("Closed: 03/04/2021"), "03/04/2021");
        assert_eq!(pattern.extract("Closed: soon"), FIELD_NOT_FOUND);
        assert_eq!(pattern.extract_with("Closed: 03/04/2021", |v| v.replace('/', "-")), "03-04-2021");
        assert_eq!(pattern.field(), "closed_date");
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = FieldPattern::new("broken", r"(unclosed", FIELD_NOT_FOUND).unwrap_err();
        assert!(matches!(err, ExtractError::RegexError(msg) if msg.starts_with("broken pattern")));
    }
}
