//! Core error type definitions

use crate::core::csv::CsvRowError;
use crate::core::directory::RemoteError;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for the bulk service
pub type Result<T> = std::result::Result<T, BulkError>;

/// Main error type for the bulk service
#[derive(Error, Debug)]
pub enum BulkError {
    /// CSV is structurally invalid or has per-row violations
    #[error("Invalid CSV content - {}", format_row_errors(.errors))]
    CsvFormat { errors: Vec<CsvRowError> },

    /// CSV has more data rows than the configured limit
    #[error("CSV row limit exceeded: limit={limit}, actual={actual}")]
    CsvTooLarge { limit: usize, actual: usize },

    /// Remote directory call failed
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Referenced batch is unknown to the store
    #[error("Batch not found: {0}")]
    BatchNotFound(Uuid),

    /// Resume requested on a batch without failed rows
    #[error("No failed rows remain for batch: {0}")]
    NoFailedRows(Uuid),

    /// Batch store is not configured for this processor
    #[error("Batch state store is not configured")]
    StateUnavailable,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client construction errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

fn format_row_errors(errors: &[CsvRowError]) -> String {
    errors
        .iter()
        .map(|err| format!("row {}: {}", err.row, err.message))
        .collect::<Vec<_>>()
        .join("; ")
}
