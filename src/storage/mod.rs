// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::CaseRecord;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes the records as CSV, one row per record, header always present.
    pub fn save_records_csv(&self, file_name: &str, records: &[CaseRecord]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(file_name);

        // Header is written by hand so an empty batch still gets one.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&file_path)?;
        writer.write_record(CaseRecord::FIELD_NAMES)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(StorageError::IoError)?;

        tracing::info!("Saved {} records to {}", records.len(), file_path.display());

        Ok(file_path)
    }

    /// Writes the records as a pretty JSON document with a timestamp.
    pub fn save_records_json(&self, file_name: &str, records: &[CaseRecord]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(file_name);

        let document = serde_json::json!({
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
            "record_count": records.len(),
            "records": records,
        });

        let document_str = serde_json::to_string_pretty(&document)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, document_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved {} records to {}", records.len(), file_path.display());

        Ok(file_path)
    }
}
