//! Row and row-error types produced by the CSV loader

use serde::{Deserialize, Serialize};

/// One validated hospital row from an upload
///
/// `row_number` is the 1-based position among data lines (header excluded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalRow {
    pub row_number: usize,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
}

/// A validation failure tied to a row; row 0 marks file-level problems
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRowError {
    pub row: usize,
    pub message: String,
}

impl CsvRowError {
    pub fn new<S: Into<String>>(row: usize, message: S) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}
