//! Error handling for the bulk service
//!
//! This module defines all error types used throughout the service.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{CsvRowErrorBody, CsvSizeErrorResponse, CsvValidationErrorResponse, ErrorResponse};
pub use types::{BulkError, Result};
