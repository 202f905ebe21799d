// src/extractors/parties.rs

// --- Imports ---
use crate::extractors::patterns::MULTI_VALUE_JOINER;
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

// --- Regex Patterns (Lazy Static) ---
// All separators are matched case-insensitively so names can keep their casing.
static VERSUS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)V\.").expect("Failed to compile VERSUS_RE"));

static PLAINTIFF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i), PLAINTIFF").expect("Failed to compile PLAINTIFF_RE"));

static DEFENDANT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i), DEFENDANT").expect("Failed to compile DEFENDANT_RE"));

static CONNECTIVE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i), AND ").expect("Failed to compile CONNECTIVE_RE"));

/// How party names are cased in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartyCasing {
    /// Names keep the casing found in the document.
    #[default]
    Preserve,
    /// The whole block is upper-cased before splitting (legacy output).
    Upper,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parties {
    pub plaintiff: String,
    pub defendant: String,
}

/// Splits the case style party text into joined plaintiff and defendant lists.
///
/// The text must contain at least one `V.` separator. Only the segments before
/// the first and between the first and second separator are read.
pub fn extract_parties(style_text: &str, casing: PartyCasing) -> Result<Parties, ExtractError> {
    let working: Cow<'_, str> = match casing {
        PartyCasing::Preserve => Cow::Borrowed(style_text),
        PartyCasing::Upper => Cow::Owned(style_text.to_uppercase()),
    };

    let segments: Vec<&str> = VERSUS_RE.split(&working).collect();
    let (plaintiffs, defendants) = match segments.as_slice() {
        [plaintiffs, defendants] => (*plaintiffs, *defendants),
        [plaintiffs, defendants, rest @ ..] => {
            tracing::debug!("Case style has {} extra 'V.' segments; ignoring them", rest.len());
            (*plaintiffs, *defendants)
        }
        _ => {
            return Err(ExtractError::MalformedStyle(format!(
                "no 'V.' separator in case style text '{}'",
                collapse_whitespace(style_text)
            )))
        }
    };

    Ok(Parties {
        plaintiff: join_party_group(plaintiffs, &PLAINTIFF_RE),
        defendant: join_party_group(defendants, &DEFENDANT_RE),
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn join_party_group(segment: &str, role_re: &Regex) -> String {
    let collapsed = collapse_whitespace(segment);
    role_re
        .split(&collapsed)
        .filter_map(clean_party_name)
        .collect::<Vec<_>>()
        .join(MULTI_VALUE_JOINER)
}

/// Drops the `, AND ` connective, commas and periods; `None` when nothing is left.
fn clean_party_name(fragment: &str) -> Option<String> {
    let without_connective = CONNECTIVE_RE.replace_all(fragment, "");
    let name: String = without_connective
        .chars()
        .filter(|c| !matches!(c, ',' | '.'))
        .collect();
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}
