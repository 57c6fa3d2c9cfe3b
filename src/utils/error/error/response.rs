//! HTTP response handling for errors

use super::types::BulkError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

impl ResponseError for BulkError {
    fn status_code(&self) -> StatusCode {
        match self {
            BulkError::CsvFormat { .. }
            | BulkError::CsvTooLarge { .. }
            | BulkError::NoFailedRows(_)
            | BulkError::BadRequest(_) => StatusCode::BAD_REQUEST,
            BulkError::BatchNotFound(_) => StatusCode::NOT_FOUND,
            BulkError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        match self {
            BulkError::CsvFormat { errors } => {
                HttpResponse::build(status_code).json(CsvValidationErrorResponse {
                    detail: "Invalid CSV format.".to_string(),
                    errors: errors
                        .iter()
                        .map(|err| CsvRowErrorBody {
                            row: err.row,
                            message: err.message.clone(),
                        })
                        .collect(),
                })
            }
            BulkError::CsvTooLarge { limit, actual } => {
                HttpResponse::build(status_code).json(CsvSizeErrorResponse {
                    detail: "CSV contains more rows than allowed.".to_string(),
                    limit: *limit,
                    actual: *actual,
                })
            }
            BulkError::BatchNotFound(_) => {
                HttpResponse::build(status_code).json(ErrorResponse::new("Batch not found."))
            }
            BulkError::NoFailedRows(_) => HttpResponse::build(status_code)
                .json(ErrorResponse::new("No failed rows remain for this batch.")),
            BulkError::StateUnavailable => {
                HttpResponse::build(status_code).json(ErrorResponse::new("Batch state unavailable."))
            }
            BulkError::BadRequest(message) | BulkError::Conflict(message) => {
                HttpResponse::build(status_code).json(ErrorResponse::new(message.clone()))
            }
            _ => HttpResponse::build(status_code).json(ErrorResponse::new("Internal server error.")),
        }
    }
}

/// Standard error response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(detail: S) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// One row-level validation failure in a rejected upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvRowErrorBody {
    pub row: usize,
    pub message: String,
}

/// Body returned when the CSV fails validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvValidationErrorResponse {
    pub detail: String,
    pub errors: Vec<CsvRowErrorBody>,
}

/// Body returned when the CSV exceeds the row limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvSizeErrorResponse {
    pub detail: String,
    pub limit: usize,
    pub actual: usize,
}
