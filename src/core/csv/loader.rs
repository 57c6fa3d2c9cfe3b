//! Hospital CSV loader

use super::types::{CsvRowError, HospitalRow};
use crate::utils::error::{BulkError, Result};
use csv::{ReaderBuilder, StringRecord};
use std::collections::BTreeSet;
use tracing::debug;

/// Columns a hospital upload may contain
pub const EXPECTED_HEADERS: [&str; 3] = ["name", "address", "phone"];

/// Columns a hospital upload must contain
pub const REQUIRED_HEADERS: [&str; 2] = ["name", "address"];

const UTF8_BOM: char = '\u{feff}';

/// Column positions resolved from the header line
struct ColumnMap {
    name: usize,
    address: usize,
    phone: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|header| header.trim().to_lowercase())
            .collect();
        let present: BTreeSet<&str> = normalized
            .iter()
            .map(String::as_str)
            .filter(|header| !header.is_empty())
            .collect();

        let missing: Vec<&str> = REQUIRED_HEADERS
            .iter()
            .copied()
            .filter(|required| !present.contains(required))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if !missing.is_empty() {
            return Err(BulkError::csv_format(format!(
                "Missing required column(s): {}",
                missing.join(", ")
            )));
        }

        let unknown: Vec<&str> = present
            .iter()
            .copied()
            .filter(|header| !EXPECTED_HEADERS.contains(header))
            .collect();
        if !unknown.is_empty() {
            return Err(BulkError::csv_format(format!(
                "Unexpected column(s): {}",
                unknown.join(", ")
            )));
        }

        // Duplicate columns resolve to the last occurrence.
        let position = |column: &str| normalized.iter().rposition(|header| header == column);

        match (position("name"), position("address")) {
            (Some(name), Some(address)) => Ok(Self {
                name,
                address,
                phone: position("phone"),
            }),
            _ => Err(BulkError::internal("required column vanished after validation")),
        }
    }

    fn row(&self, row_number: usize, record: &StringRecord) -> HospitalRow {
        let field = |index: usize| record.get(index).unwrap_or_default().trim().to_string();

        HospitalRow {
            row_number,
            name: field(self.name),
            address: field(self.address),
            phone: self
                .phone
                .map(field)
                .filter(|phone| !phone.is_empty()),
        }
    }
}

/// Parse and validate an uploaded hospital CSV
///
/// Header and encoding problems fail fast. Per-row violations are collected
/// and reported together, unless the row limit is exceeded first, in which case
/// the size failure wins.
pub fn parse_hospital_csv(raw_bytes: &[u8], limit: usize) -> Result<Vec<HospitalRow>> {
    let text = std::str::from_utf8(raw_bytes)
        .map_err(|_| BulkError::csv_format("Unable to decode CSV as UTF-8"))?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| BulkError::csv_format(format!("Unable to read header row: {}", e)))?
        .clone();
    if headers.is_empty() {
        return Err(BulkError::csv_format("Missing header row"));
    }

    let columns = ColumnMap::from_headers(&headers)?;

    let mut rows: Vec<HospitalRow> = Vec::new();
    let mut errors: Vec<CsvRowError> = Vec::new();

    for (offset, record) in reader.records().enumerate() {
        let row_number = offset + 1;
        let record = record.map_err(|e| BulkError::CsvFormat {
            errors: vec![CsvRowError::new(row_number, format!("Malformed CSV row: {}", e))],
        })?;

        let row = columns.row(row_number, &record);
        if row.name.is_empty() {
            errors.push(CsvRowError::new(row_number, "Name is required"));
        }
        if row.address.is_empty() {
            errors.push(CsvRowError::new(row_number, "Address is required"));
        }
        rows.push(row);

        if rows.len() > limit {
            return Err(BulkError::CsvTooLarge {
                limit,
                actual: rows.len(),
            });
        }
    }

    if !errors.is_empty() {
        return Err(BulkError::CsvFormat { errors });
    }

    if rows.is_empty() {
        return Err(BulkError::csv_format("CSV contains no hospital rows"));
    }

    debug!(rows = rows.len(), "Parsed hospital CSV");
    Ok(rows)
}
