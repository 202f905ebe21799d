// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 500 from the docket host

    #[error("Docket host refused the request (check User-Agent and request rate)")]
    RateLimited,

    #[error("Docket not found: {0}")]
    NotFound(String),
}

/// Structural failures while reading one docket document.
///
/// Field-level misses never show up here; they degrade to sentinel values
/// inside the record instead.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The document is a bot-verification page rather than docket content.
    #[error("Bot challenge page encountered at {source_link}")]
    ChallengeDetected { source_link: String },

    /// The case style block is missing or has no party separator.
    #[error("Malformed case style block: {0}")]
    MalformedStyle(String),

    #[error("Regular expression error: {0}")]
    RegexError(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Docket retrieval failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Batch aborted: {0}")]
    Aborted(String),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
