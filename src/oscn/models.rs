// src/oscn/models.rs
use crate::utils::AppError;
use serde::Serialize;

/// Docket page endpoint on the public court site.
pub const OSCN_DOCKET_URL: &str = "https://www.oscn.net/dockets/GetCaseInformation.aspx";

/// One case to look up: the case number and the county database that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseQuery {
    pub case_number: String, // e.g. "CJ-2022-123"
    pub county: String,      // e.g. "tulsa", "oklahoma"
}

impl CaseQuery {
    pub fn new(case_number: impl Into<String>, county: impl Into<String>) -> Self {
        Self {
            case_number: case_number.into(),
            county: county.into(),
        }
    }

    /// Constructs the URL of this case's docket page
    pub fn docket_url(&self, base_url: &str) -> String {
        format!("{}?db={}&number={}", base_url, self.county, self.case_number)
    }
}

/// Consecutive case numbers of one type and year, e.g. `CJ-2022-100` ..= `CJ-2022-120`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseNumberRange {
    abbreviation: String,
    year: u32,
    start: u32,
    end: u32,
}

impl CaseNumberRange {
    pub fn new(abbreviation: &str, year: u32, start: u32, end: u32) -> Result<Self, AppError> {
        let abbreviation = abbreviation.trim().to_uppercase();
        if abbreviation.is_empty() {
            return Err(AppError::Config("Case type abbreviation must not be empty".to_string()));
        }
        if start > end {
            return Err(AppError::Config(format!(
                "Starting number {} is greater than ending number {}",
                start, end
            )));
        }
        Ok(Self { abbreviation, year, start, end })
    }

    /// Number of case numbers in the range; never zero.
    pub fn count(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn case_numbers(&self) -> impl Iterator<Item = String> + '_ {
        (self.start..=self.end).map(move |n| format!("{}-{}-{}", self.abbreviation, self.year, n))
    }

    pub fn queries<'a>(&'a self, county: &'a str) -> impl Iterator<Item = CaseQuery> + 'a {
        self.case_numbers().map(move |number| CaseQuery::new(number, county))
    }
}
