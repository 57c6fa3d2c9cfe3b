//! CSV validation for hospital uploads
//!
//! Turns raw upload bytes into validated [`HospitalRow`] records, or fails with
//! a structured format or size error before any batch exists.

mod loader;
mod types;


pub use loader::{EXPECTED_HEADERS, REQUIRED_HEADERS, parse_hospital_csv};
pub use types::{CsvRowError, HospitalRow};
