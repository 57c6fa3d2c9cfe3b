//! Helper functions for creating specific error types

use super::types::BulkError;
use crate::core::csv::CsvRowError;

/// Helper functions for creating specific errors
impl BulkError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Format failure that is not tied to a data row (reported at row 0)
    pub fn csv_format<S: Into<String>>(message: S) -> Self {
        Self::CsvFormat {
            errors: vec![CsvRowError::new(0, message)],
        }
    }

    /// Whether the error was caused by the uploaded content rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BulkError::CsvFormat { .. }
                | BulkError::CsvTooLarge { .. }
                | BulkError::BatchNotFound(_)
                | BulkError::NoFailedRows(_)
                | BulkError::BadRequest(_)
                | BulkError::Conflict(_)
        )
    }
}
