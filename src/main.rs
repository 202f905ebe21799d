// src/main.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use docket_extractor::batch::{BatchRunner, ConsoleResolver, MalformedPolicy};
use docket_extractor::oscn::{CaseNumberRange, CaseQuery, ClientConfig, OscnClient};
use docket_extractor::oscn::client::{DEFAULT_REQUEST_DELAY_MS, DEFAULT_USER_AGENT};
use docket_extractor::storage::StorageManager;
use docket_extractor::utils::{self, AppError};
use docket_extractor::{CaseRecord, DocketExtractor, ExtractorConfig, PartyCasing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

/// Command Line Interface for the court docket extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// County database holding the cases (e.g. "tulsa", "oklahoma")
    #[arg(short, long, default_value = "tulsa")]
    county: String,

    /// Two letter case type abbreviation (e.g. CJ, SC, CF)
    #[arg(short = 't', long)]
    case_type: Option<String>,

    /// Full case year (e.g. 2022)
    #[arg(short, long)]
    year: Option<u32>,

    /// First case number in the range
    #[arg(long)]
    start: Option<u32>,

    /// Last case number in the range (inclusive)
    #[arg(long)]
    end: Option<u32>,

    /// Extract a saved docket page instead of fetching (requires --case-number)
    #[arg(long)]
    html_file: Option<PathBuf>,

    /// Case number of the saved docket page
    #[arg(long)]
    case_number: Option<String>,

    /// Output directory for extracted records
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Output file name inside the output directory
    #[arg(long, default_value = "output.csv")]
    output_file: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// User-Agent sent to the docket host
    #[arg(long, env = "DOCKET_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Delay before each request, in milliseconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_DELAY_MS)]
    delay_ms: u64,

    /// Emit party names upper-cased
    #[arg(long)]
    uppercase_parties: bool,

    /// Stop the batch at the first docket whose parties cannot be read
    #[arg(long)]
    abort_on_malformed: bool,

    /// Debug mode - save raw and annotated docket pages
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Initialize storage and extractor
    let storage = StorageManager::new(&args.output_dir)?;
    let extractor = DocketExtractor::with_config(ExtractorConfig {
        party_casing: if args.uppercase_parties { PartyCasing::Upper } else { PartyCasing::Preserve },
        ..ExtractorConfig::default()
    });

    // 4. Offline mode: one saved page
    let records = if let Some(html_file) = &args.html_file {
        let case_number = args.case_number.as_deref().ok_or_else(|| {
            AppError::Config("--html-file requires --case-number".to_string())
        })?;
        let markup = std::fs::read_to_string(html_file)?;
        let link = html_file.display().to_string();
        tracing::info!("Extracting saved docket {} from {}", case_number, link);
        vec![extractor.extract(&markup, case_number, &link)?]
    } else {
        run_batch(&args, &storage, &extractor).await?
    };

    // 5. Persist
    let path = match args.format {
        OutputFormat::Csv => storage.save_records_csv(&args.output_file, &records)?,
        OutputFormat::Json => storage.save_records_json(&args.output_file, &records)?,
    };
    tracing::info!("Wrote {} records to {}", records.len(), path.display());

    Ok(())
}

async fn run_batch(args: &Args, storage: &StorageManager, extractor: &DocketExtractor) -> Result<Vec<CaseRecord>, AppError> {
    let (Some(case_type), Some(year), Some(start), Some(end)) = (&args.case_type, args.year, args.start, args.end) else {
        return Err(AppError::Config(
            "Provide --case-type, --year, --start and --end, or --html-file".to_string(),
        ));
    };

    let range = CaseNumberRange::new(case_type, year, start, end)?;
    tracing::info!("Processing {} cases in {} county", range.count(), args.county);

    let client = OscnClient::new(ClientConfig {
        user_agent: args.user_agent.clone(),
        request_delay: Duration::from_millis(args.delay_ms),
        ..ClientConfig::default()
    })?;

    let policy = if args.abort_on_malformed { MalformedPolicy::Abort } else { MalformedPolicy::Skip };
    let resolver = ConsoleResolver;
    let mut runner = BatchRunner::new(&client, &resolver, extractor).with_policy(policy);
    if args.debug {
        runner = runner.with_debug_dir(storage.base_dir().join("debug"));
    }

    let queries: Vec<CaseQuery> = range.queries(&args.county).collect();
    let outcome = runner.run(queries).await?;

    for (case_number, reason) in &outcome.failures {
        tracing::warn!("No record for {}: {}", case_number, reason);
    }

    if outcome.records.is_empty() && !outcome.failures.is_empty() {
        return Err(AppError::Processing(format!(
            "Failed to extract any dockets from {} cases",
            outcome.failures.len()
        )));
    }

    Ok(outcome.records)
}
