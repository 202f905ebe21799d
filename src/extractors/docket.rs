// src/extractors/docket.rs

// --- Imports ---
use crate::extractors::case_type::extract_case_type;
use crate::extractors::dates::{extract_closed_date, extract_filed_date, extract_judge};
use crate::extractors::document::{ParsedDocument, CHALLENGE_MARKER};
use crate::extractors::judgment::extract_judgment;
use crate::extractors::parties::{extract_parties, PartyCasing};
use crate::utils::error::ExtractError;
use serde::Serialize;

// --- Data Structures ---
/// One extracted docket. Every field always holds a value or its sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseRecord {
    case_number: String,
    case_type: String,
    judgment: String,
    plaintiff: String,
    defendant: String,
    filed_date: String,
    closed_date: String,
    judge: String,
    source_link: String,
}

impl CaseRecord {
    /// Column names in output order.
    pub const FIELD_NAMES: [&'static str; 9] = [
        "case_number",
        "case_type",
        "judgment",
        "plaintiff",
        "defendant",
        "filed_date",
        "closed_date",
        "judge",
        "source_link",
    ];

    pub fn case_number(&self) -> &str {
        &self.case_number
    }

    pub fn case_type(&self) -> &str {
        &self.case_type
    }

    pub fn judgment(&self) -> &str {
        &self.judgment
    }

    pub fn plaintiff(&self) -> &str {
        &self.plaintiff
    }

    pub fn defendant(&self) -> &str {
        &self.defendant
    }

    pub fn filed_date(&self) -> &str {
        &self.filed_date
    }

    pub fn closed_date(&self) -> &str {
        &self.closed_date
    }

    pub fn judge(&self) -> &str {
        &self.judge
    }

    pub fn source_link(&self) -> &str {
        &self.source_link
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub party_casing: PartyCasing,
    /// Case-insensitive text identifying a challenge page. Empty disables the check.
    pub challenge_marker: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            party_casing: PartyCasing::default(),
            challenge_marker: CHALLENGE_MARKER.to_string(),
        }
    }
}

/// Turns docket markup into a [`CaseRecord`]. Holds no per-document state.
#[derive(Debug, Clone, Default)]
pub struct DocketExtractor {
    config: ExtractorConfig,
}

impl DocketExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts every field of one docket.
    ///
    /// Fails with [`ExtractError::ChallengeDetected`] before reading any field
    /// when the markup is a challenge page, and with
    /// [`ExtractError::MalformedStyle`] when the parties cannot be located.
    pub fn extract(&self, document_text: &str, case_number: &str, source_link: &str) -> Result<CaseRecord, ExtractError> {
        let document = ParsedDocument::load_with_marker(document_text, source_link, &self.config.challenge_marker)?;
        let style = document.case_style()?;
        let parties = extract_parties(&style.party_text, self.config.party_casing)?;

        let record = CaseRecord {
            case_number: case_number.to_string(),
            case_type: extract_case_type(document.text()),
            judgment: extract_judgment(&document),
            plaintiff: parties.plaintiff,
            defendant: parties.defendant,
            filed_date: extract_filed_date(document.text()),
            closed_date: extract_closed_date(document.text()),
            judge: extract_judge(&style.block_text),
            source_link: source_link.to_string(),
        };

        tracing::debug!("Extracted {}: {:?}", case_number, record);
        Ok(record)
    }
}

/// Extracts one docket with the default configuration.
pub fn extract(document_text: &str, case_number: &str, source_link: &str) -> Result<CaseRecord, ExtractError> {
    DocketExtractor::new().extract(document_text, case_number, source_link)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const LINK: &str = "https://www.oscn.net/dockets/GetCaseInformation.aspx?db=tulsa&number=CJ-2020-123";

    /// A docket page shaped like the real thing, with optional extra body content.
    pub(crate) fn docket_page(parties: &str, dispositions: &str, closed: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html><head><title>OSCN Case Details</title></head>
<body>
<table class="caseStyle">
  <tr>
    <td>{parties}</td>
    <td>
      No. CJ-2020-123<br>
      (Civil relief more than $10,000: CONTRACT)<br><br>
      Filed: 01/02/2020<br>
      {closed}<br><br>
      Judge: Smith,
      John
    </td>
  </tr>
</table>
<h2>Issues</h2>
{dispositions}
</body></html>"#
        )
    }

    fn standard_parties() -> &'static str {
        "JOHN DOE,<br> PLAINTIFF,<br> AND<br> JANE DOE,<br> PLAINTIFF<br>v.<br>ACME CORP.,<br> DEFENDANT."
    }

    #[test]
    fn test_full_record() {
        let html = docket_page(
            standard_parties(),
            r#"<font color="red">Disposed: JUDGMENT FOR PLAINTIFF, 05/06/2021. Judgment</font>"#,
            "Closed: 05/06/2021",
        );
        let record = extract(&html, "CJ-2020-123", LINK).unwrap();

        assert_eq!(record.case_number(), "CJ-2020-123");
        assert_eq!(record.case_type(), "Civil relief more than $10,000: CONTRACT");
        assert_eq!(record.judgment(), "JUDGMENT FOR PLAINTIFF");
        assert_eq!(record.plaintiff(), "JOHN DOE && JANE DOE");
        assert_eq!(record.defendant(), "ACME CORP");
        assert_eq!(record.filed_date(), "01/02/2020");
        assert_eq!(record.closed_date(), "05/06/2021");
        assert_eq!(record.judge(), "Smith,      John");
        assert_eq!(record.source_link(), LINK);
    }

    #[test]
    fn test_open_case_degrades_to_sentinels() {
        let html = docket_page(standard_parties(), "", "");
        let record = extract(&html, "CJ-2020-123", LINK).unwrap();

        assert_eq!(record.judgment(), "Disposition Pending");
        assert_eq!(record.closed_date(), "Not found");
        assert_eq!(record.filed_date(), "01/02/2020");
        assert_eq!(record.plaintiff(), "JOHN DOE && JANE DOE");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = docket_page(
            standard_parties(),
            r#"<font color="red">Disposed: DISMISSED, 01/01/2021</font><font color="red">Disposed: DISMISSED, 02/01/2021</font>"#,
            "Closed: 02/01/2021",
        );
        let first = extract(&html, "CJ-2020-123", LINK).unwrap();
        let second = extract(&html, "CJ-2020-123", LINK).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.judgment(), "DISMISSED && DISMISSED");
    }

    #[test]
    fn test_challenge_page_raises() {
        let html = "<html><body><h1>Please verify you are human</h1><div>reCAPTCHA</div></body></html>";
        let err = extract(html, "CJ-2020-123", LINK).unwrap_err();
        assert!(matches!(err, ExtractError::ChallengeDetected { ref source_link } if source_link == LINK));
    }

    #[test]
    fn test_challenge_check_precedes_style_check() {
        // No case style table either; the challenge still wins.
        let err = extract("<p>CAPTCHA</p>", "CJ-2020-123", LINK).unwrap_err();
        assert!(matches!(err, ExtractError::ChallengeDetected { .. }));
    }

    #[test]
    fn test_missing_versus_is_malformed() {
        let html = docket_page("IN RE THE ESTATE OF JOHN DOE", "", "");
        assert!(matches!(
            extract(&html, "PB-2020-1", LINK),
            Err(ExtractError::MalformedStyle(_))
        ));
    }

    #[test]
    fn test_custom_marker_and_casing() {
        let config = ExtractorConfig {
            party_casing: PartyCasing::Upper,
            challenge_marker: "Access Denied".to_string(),
        };
        let extractor = DocketExtractor::with_config(config);

        let html = docket_page("Jane Roe, Plaintiff, v. Widget Co., Defendant.", "", "");
        let record = extractor.extract(&html, "CJ-2020-123", LINK).unwrap();
        assert_eq!(record.plaintiff(), "JANE ROE");
        assert_eq!(record.defendant(), "WIDGET CO");

        assert!(extractor.extract("<p>ACCESS DENIED</p>", "CJ-2020-123", LINK).is_err());
    }

    #[test]
    fn test_extractor_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DocketExtractor>();
        assert_send_sync::<CaseRecord>();
    }
}
