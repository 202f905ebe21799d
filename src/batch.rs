// src/batch.rs
//! Runs many case lookups through the extractor, one at a time.
//!
//! A challenge page stops the current case until a human operator clears it,
//! then the same case is fetched again. Retrieval failures and (by default)
//! malformed dockets are logged and skipped.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::extractors::{CaseRecord, DocketExtractor};
use crate::oscn::models::CaseQuery;
use crate::utils::error::{AppError, ExtractError, FetchError};
use crate::utils::html_debug;

/// Where docket markup comes from.
#[allow(async_fn_in_trait)]
pub trait DocketSource {
    /// Locator recorded as the record's `source_link` and shown to the operator.
    fn locator(&self, query: &CaseQuery) -> String;

    async fn fetch(&self, query: &CaseQuery) -> Result<String, FetchError>;
}

/// Hands a challenge page to a human and waits until it has been solved.
pub trait ChallengeResolver {
    /// `Err` stops the whole batch.
    fn resolve(&self, source_link: &str) -> Result<(), AppError>;
}

/// Prompts on the terminal and waits for Enter.
pub struct ConsoleResolver;

impl ChallengeResolver for ConsoleResolver {
    fn resolve(&self, source_link: &str) -> Result<(), AppError> {
        let mut stdout = io::stdout();
        writeln!(stdout, "Challenge detected. Open this page in a browser and solve it:")?;
        writeln!(stdout, "  {}", source_link)?;
        write!(stdout, "Press Enter to continue...")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(AppError::Aborted("stdin closed while waiting for challenge".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Log the document and move on.
    #[default]
    Skip,
    /// Stop the batch with the error.
    Abort,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<CaseRecord>,
    /// Case numbers that produced no record, with the reason.
    pub failures: Vec<(String, String)>,
}

pub struct BatchRunner<'a, S, R> {
    source: &'a S,
    resolver: &'a R,
    extractor: &'a DocketExtractor,
    policy: MalformedPolicy,
    debug_dir: Option<PathBuf>,
}

impl<'a, S: DocketSource, R: ChallengeResolver> BatchRunner<'a, S, R> {
    pub fn new(source: &'a S, resolver: &'a R, extractor: &'a DocketExtractor) -> Self {
        Self {
            source,
            resolver,
            extractor,
            policy: MalformedPolicy::default(),
            debug_dir: None,
        }
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Saves raw and annotated markup of every fetched docket under `dir`.
    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = Some(dir.into());
        self
    }

    pub async fn run(&self, queries: impl IntoIterator<Item = CaseQuery>) -> Result<BatchOutcome, AppError> {
        let mut outcome = BatchOutcome::default();

        for query in queries {
            match self.process(&query).await? {
                Ok(record) => {
                    tracing::info!("{}: {} v. {} ({})", record.case_number(), record.plaintiff(), record.defendant(), record.judgment());
                    outcome.records.push(record);
                }
                Err(reason) => outcome.failures.push((query.case_number.clone(), reason)),
            }
        }

        tracing::info!(
            "Batch finished. Records: {}, Failures: {}",
            outcome.records.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }

    /// Outer `Err` stops the batch; inner `Err` skips this case.
    async fn process(&self, query: &CaseQuery) -> Result<Result<CaseRecord, String>, AppError> {
        let link = self.source.locator(query);

        loop {
            let markup = match self.source.fetch(query).await {
                Ok(markup) => markup,
                Err(e) => {
                    tracing::error!("Failed to download docket {}: {}", query.case_number, e);
                    return Ok(Err(e.to_string()));
                }
            };

            if let Some(dir) = &self.debug_dir {
                if let Err(e) = html_debug::save_docket_debug(&markup, dir, &query.case_number) {
                    tracing::warn!("Failed to save debug markup for {}: {}", query.case_number, e);
                }
            }

            match self.extractor.extract(&markup, &query.case_number, &link) {
                Ok(record) => return Ok(Ok(record)),
                Err(ExtractError::ChallengeDetected { source_link }) => {
                    tracing::warn!("Challenge page for {}, waiting for operator", query.case_number);
                    self.resolver.resolve(&source_link)?;
                }
                Err(e) => {
                    tracing::error!("Failed to extract {}: {}", query.case_number, e);
                    return match self.policy {
                        MalformedPolicy::Skip => Ok(Err(e.to_string())),
                        MalformedPolicy::Abort => Err(e.into()),
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::docket::tests::{docket_page, LINK};
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    const CHALLENGE: &str = "<html><body>Please solve the CAPTCHA</body></html>";

    /// Serves queued responses per case number.
    struct FakeSource {
        responses: RefCell<HashMap<String, Vec<Result<String, FetchError>>>>,
    }

    impl FakeSource {
        fn new(responses: Vec<(&str, Vec<Result<String, FetchError>>)>) -> Self {
            let responses = responses
                .into_iter()
                .map(|(number, mut queue)| {
                    queue.reverse();
                    (number.to_string(), queue)
                })
                .collect();
            Self { responses: RefCell::new(responses) }
        }
    }

    impl DocketSource for FakeSource {
        fn locator(&self, _query: &CaseQuery) -> String {
            LINK.to_string()
        }

        async fn fetch(&self, query: &CaseQuery) -> Result<String, FetchError> {
            self.responses
                .borrow_mut()
                .get_mut(&query.case_number)
                .and_then(|queue| queue.pop())
                .unwrap_or_else(|| Err(FetchError::NotFound(query.case_number.clone())))
        }
    }

    struct CountingResolver {
        calls: Cell<usize>,
        give_up: bool,
    }

    impl CountingResolver {
        fn new(give_up: bool) -> Self {
            Self { calls: Cell::new(0), give_up }
        }
    }

    impl ChallengeResolver for CountingResolver {
        fn resolve(&self, source_link: &str) -> Result<(), AppError> {
            assert_eq!(source_link, LINK);
            self.calls.set(self.calls.get() + 1);
            if self.give_up {
                return Err(AppError::Aborted("operator quit".to_string()));
            }
            Ok(())
        }
    }

    fn good_page() -> String {
        docket_page("A, PLAINTIFF V. B, DEFENDANT", "", "")
    }

    fn queries(numbers: &[&str]) -> Vec<CaseQuery> {
        numbers.iter().map(|n| CaseQuery::new(*n, "tulsa")).collect()
    }

    #[test]
    fn test_challenge_is_retried_after_operator() {
        let source = FakeSource::new(vec![(
            "CJ-2020-1",
            vec![Ok(CHALLENGE.to_string()), Ok(CHALLENGE.to_string()), Ok(good_page())],
        )]);
        let resolver = CountingResolver::new(false);
        let extractor = DocketExtractor::new();

        let outcome = tokio_test::block_on(
            BatchRunner::new(&source, &resolver, &extractor).run(queries(&["CJ-2020-1"])),
        )
        .unwrap();

        assert_eq!(resolver.calls.get(), 2);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].plaintiff(), "A");
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_operator_abort_stops_batch() {
        let source = FakeSource::new(vec![("CJ-2020-1", vec![Ok(CHALLENGE.to_string())])]);
        let resolver = CountingResolver::new(true);
        let extractor = DocketExtractor::new();

        let result = tokio_test::block_on(
            BatchRunner::new(&source, &resolver, &extractor).run(queries(&["CJ-2020-1", "CJ-2020-2"])),
        );
        assert!(matches!(result, Err(AppError::Aborted(_))));
    }

    #[test]
    fn test_failures_are_skipped_in_order() {
        let source = FakeSource::new(vec![
            ("CJ-2020-1", vec![Ok(good_page())]),
            ("CJ-2020-2", vec![Ok(docket_page("NO PARTY SEPARATOR", "", ""))]),
            ("CJ-2020-4", vec![Ok(good_page())]),
        ]);
        let resolver = CountingResolver::new(false);
        let extractor = DocketExtractor::new();

        let outcome = tokio_test::block_on(
            BatchRunner::new(&source, &resolver, &extractor)
                .run(queries(&["CJ-2020-1", "CJ-2020-2", "CJ-2020-3", "CJ-2020-4"])),
        )
        .unwrap();

        let numbers: Vec<&str> = outcome.records.iter().map(|r| r.case_number()).collect();
        assert_eq!(numbers, vec!["CJ-2020-1", "CJ-2020-4"]);
        let failed: Vec<&str> = outcome.failures.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(failed, vec!["CJ-2020-2", "CJ-2020-3"]);
        assert_eq!(resolver.calls.get(), 0);
    }

    #[test]
    fn test_abort_policy_propagates_malformed_style() {
        let source = FakeSource::new(vec![("CJ-2020-2", vec![Ok(docket_page("NO PARTY SEPARATOR", "", ""))])]);
        let resolver = CountingResolver::new(false);
        let extractor = DocketExtractor::new();

        let result = tokio_test::block_on(
            BatchRunner::new(&source, &resolver, &extractor)
                .with_policy(MalformedPolicy::Abort)
                .run(queries(&["CJ-2020-2"])),
        );
        assert!(matches!(result, Err(AppError::Extraction(ExtractError::MalformedStyle(_)))));
    }

    #[test]
    fn test_debug_dir_receives_markup() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::new(vec![("CJ-2020-1", vec![Ok(good_page())])]);
        let resolver = CountingResolver::new(false);
        let extractor = DocketExtractor::new();

        tokio_test::block_on(
            BatchRunner::new(&source, &resolver, &extractor)
                .with_debug_dir(dir.path())
                .run(queries(&["CJ-2020-1"])),
        )
        .unwrap();

        assert!(dir.path().join("CJ-2020-1_raw.html").exists());
        assert!(dir.path().join("CJ-2020-1_annotated.html").exists());
    }
}
