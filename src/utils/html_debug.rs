// src/utils/html_debug.rs
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::error::AppError;

/// Markers worth seeing in context when a docket extracts badly.
static DOCKET_MARKERS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r#"(?i)<table[^>]*class=['"]?caseStyle['"]?[^>]*>"#, "style"),
        (r#"(?i)<font[^>]*color=['"]?red['"]?[^>]*>"#, "disposition"),
        (r"Disposed:", "disposition"),
        (r"Filed:\s*\d\d/\d\d/\d\d\d\d", "dates"),
        (r"Closed:\s*\d\d/\d\d/\d\d\d\d", "dates"),
        (r"Judge:", "judge"),
        (r"(?i)captcha", "challenge"),
    ]
    .iter()
    .filter_map(|(pat, kind)| Regex::new(pat).ok().map(|re| (re, *kind)))
    .collect()
});

/// Wraps each highlight range of `markup` in a labelled span and returns the page.
///
/// Ranges that overlap an earlier range are dropped.
pub fn annotate_markup(markup: &str, highlights: &[(usize, usize, &str)]) -> String {
    let mut annotated = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    annotated.push_str(".hl-style { background-color: #FFFF00; }\n");
    annotated.push_str(".hl-disposition { background-color: #FFA500; }\n");
    annotated.push_str(".hl-dates { background-color: #90EE90; }\n");
    annotated.push_str(".hl-judge { background-color: #ADD8E6; }\n");
    annotated.push_str(".hl-challenge { background-color: #FF6347; }\n");
    annotated.push_str("</style>\n</head>\n<body>\n");

    let mut sorted = highlights.to_vec();
    sorted.sort_by_key(|h| h.0);

    let mut last_pos = 0;
    for (start, end, kind) in sorted {
        if start < last_pos || end > markup.len() {
            continue;
        }
        annotated.push_str(&markup[last_pos..start]);
        annotated.push_str(&format!(
            "<span class=\"hl-{}\" title=\"{} @ {}-{}\">",
            kind, kind, start, end
        ));
        annotated.push_str(&markup[start..end]);
        annotated.push_str("</span>");
        last_pos = end;
    }
    annotated.push_str(&markup[last_pos..]);

    annotated.push_str("\n</body>\n</html>");
    annotated
}

/// Saves the raw docket markup and an annotated copy into `debug_dir`.
pub fn save_docket_debug(markup: &str, debug_dir: &Path, case_number: &str) -> Result<(), AppError> {
    fs::create_dir_all(debug_dir)?;

    let raw_path = debug_dir.join(format!("{}_raw.html", case_number));
    fs::write(&raw_path, markup)?;

    let highlights: Vec<(usize, usize, &str)> = DOCKET_MARKERS
        .iter()
        .flat_map(|(re, kind)| re.find_iter(markup).map(move |m| (m.start(), m.end(), *kind)))
        .collect();

    let annotated_path = debug_dir.join(format!("{}_annotated.html", case_number));
    fs::write(&annotated_path, annotate_markup(markup, &highlights))?;

    tracing::debug!(
        "Saved debug markup for {} ({} markers) to {}",
        case_number,
        highlights.len(),
        debug_dir.display()
    );
    Ok(())
}
