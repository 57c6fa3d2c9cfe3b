//! Batch data model and the shapes returned to callers

use crate::core::csv::HospitalRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Outcome status of a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    /// Created upstream, batch not (yet) activated
    Created,
    /// Created upstream and activated with its batch
    CreatedAndActivated,
    /// Creation failed; the row can be retried by resuming the batch
    Failed,
}

impl RowStatus {
    /// Whether the row exists upstream
    pub fn is_success(&self) -> bool {
        matches!(self, RowStatus::Created | RowStatus::CreatedAndActivated)
    }
}

/// Result of attempting one row against the Hospital Directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOutcome {
    pub row: usize,
    pub name: String,
    pub status: RowStatus,
    pub hospital_id: Option<i64>,
    pub error: Option<String>,
}

impl RowOutcome {
    pub fn created(row: &HospitalRow, hospital_id: Option<i64>) -> Self {
        Self {
            row: row.row_number,
            name: row.name.clone(),
            status: RowStatus::Created,
            hospital_id,
            error: None,
        }
    }

    pub fn failed<S: Into<String>>(row: &HospitalRow, error: S) -> Self {
        Self {
            row: row.row_number,
            name: row.name.clone(),
            status: RowStatus::Failed,
            hospital_id: None,
            error: Some(error.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == RowStatus::Failed
    }
}

/// Batch lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Processing,
    Resuming,
    Completed,
    CompletedWithFailures,
    CompletedActivationFailed,
}

impl BatchStatus {
    /// Whether a processing pass currently owns the batch
    pub fn is_in_flight(&self) -> bool {
        matches!(self, BatchStatus::Processing | BatchStatus::Resuming)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Processing => "processing",
            BatchStatus::Resuming => "resuming",
            BatchStatus::Completed => "completed",
            BatchStatus::CompletedWithFailures => "completed_with_failures",
            BatchStatus::CompletedActivationFailed => "completed_activation_failed",
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time copy of a batch, detached from the store
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSnapshot {
    pub batch_id: Uuid,
    pub status: BatchStatus,
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Accumulated across the initial pass and every resume
    pub processing_time: Option<Duration>,
    /// `None` until activation has been attempted
    pub batch_activated: Option<bool>,
    pub activation_error: Option<String>,
    /// Sorted by row ordinal
    pub hospitals: Vec<RowOutcome>,
}

/// Upload and resume response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub batch_id: Uuid,
    pub total_hospitals: usize,
    pub processed_hospitals: usize,
    pub failed_hospitals: usize,
    pub processing_time_seconds: f64,
    pub batch_activated: bool,
    pub activation_error: Option<String>,
    pub hospitals: Vec<RowOutcome>,
}

impl From<BatchSnapshot> for BatchResult {
    fn from(snapshot: BatchSnapshot) -> Self {
        Self {
            batch_id: snapshot.batch_id,
            total_hospitals: snapshot.total,
            processed_hospitals: snapshot.processed,
            failed_hospitals: snapshot.failed,
            processing_time_seconds: round_seconds(snapshot.processing_time.unwrap_or_default()),
            batch_activated: snapshot.batch_activated.unwrap_or(false),
            activation_error: snapshot.activation_error,
            hospitals: snapshot.hospitals,
        }
    }
}

/// Progress query response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub batch_id: Uuid,
    pub status: BatchStatus,
    pub total_hospitals: usize,
    pub processed_hospitals: usize,
    pub failed_hospitals: usize,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub processing_time_seconds: Option<f64>,
    pub batch_activated: Option<bool>,
    pub activation_error: Option<String>,
    pub hospitals: Vec<RowOutcome>,
}

impl From<BatchSnapshot> for BatchProgress {
    fn from(snapshot: BatchSnapshot) -> Self {
        Self {
            batch_id: snapshot.batch_id,
            status: snapshot.status,
            total_hospitals: snapshot.total,
            processed_hospitals: snapshot.processed,
            failed_hospitals: snapshot.failed,
            started_at: snapshot.started_at,
            updated_at: snapshot.updated_at,
            processing_time_seconds: snapshot.processing_time.map(round_seconds),
            batch_activated: snapshot.batch_activated,
            activation_error: snapshot.activation_error,
            hospitals: snapshot.hospitals,
        }
    }
}

/// Seconds rounded to millisecond precision
pub fn round_seconds(duration: Duration) -> f64 {
    (duration.as_secs_f64() * 1000.0).round() / 1000.0
}
