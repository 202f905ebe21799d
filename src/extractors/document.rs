// src/extractors/document.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Text that marks a bot-verification page, compared case-insensitively.
pub const CHALLENGE_MARKER: &str = "CAPTCHA";

// --- CSS Selectors (Lazy Static) ---
static CASE_STYLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table.caseStyle").expect("Failed to compile CASE_STYLE_SELECTOR")
});

static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td").expect("Failed to compile CELL_SELECTOR")
});

/// Text of the case style table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseStyle {
    /// Flattened text of the whole table (parties, case number, dates, judge).
    pub block_text: String,
    /// Flattened text of the table's first cell (the parties).
    pub party_text: String,
}

/// One docket page, parsed once and queried by every field extractor.
pub struct ParsedDocument {
    html: Html,
    text: String,
}

impl ParsedDocument {
    /// Parses `markup`, failing if it is a challenge page.
    pub fn load(markup: &str, source_link: &str) -> Result<Self, ExtractError> {
        Self::load_with_marker(markup, source_link, CHALLENGE_MARKER)
    }

    pub fn load_with_marker(markup: &str, source_link: &str, marker: &str) -> Result<Self, ExtractError> {
        let html = Html::parse_document(markup);
        let text = html.root_element().text().collect::<String>();

        if !marker.is_empty() && text.to_uppercase().contains(&marker.to_uppercase()) {
            tracing::warn!("Challenge marker '{}' found in document from {}", marker, source_link);
            return Err(ExtractError::ChallengeDetected { source_link: source_link.to_string() });
        }

        tracing::trace!("Loaded document from {} ({} chars of text)", source_link, text.len());
        Ok(Self { html, text })
    }

    /// Whole-document text, in document order.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Flattened text of every element matching `selector`, in document order.
    pub fn select_texts(&self, selector: &Selector) -> Vec<String> {
        self.html
            .select(selector)
            .map(|element| element.text().collect::<String>())
            .collect()
    }

    /// Locates the first case style table and its first cell.
    pub fn case_style(&self) -> Result<CaseStyle, ExtractError> {
        let table = self
            .html
            .select(&CASE_STYLE_SELECTOR)
            .next()
            .ok_or_else(|| ExtractError::MalformedStyle("no case style table in document".to_string()))?;

        let party_cell = table
            .select(&CELL_SELECTOR)
            .next()
            .ok_or_else(|| ExtractError::MalformedStyle("case style table has no cells".to_string()))?;

        Ok(CaseStyle {
            block_text: table.text().collect::<String>(),
            party_text: party_cell.text().collect::<String>(),
        })
    }
}
