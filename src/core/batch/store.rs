//! In-memory batch state
//!
//! Every mutation takes the store's write lock for the duration of an in-memory
//! update only; no lock is held across a network call. Reads hand out clones.

use super::types::{BatchSnapshot, BatchStatus, RowOutcome, RowStatus};
use crate::core::csv::HospitalRow;
use crate::utils::error::{BulkError, Result};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Error recorded for rows a pass never finished submitting
pub const INTERRUPTED_ROW_ERROR: &str = "Processing stopped before this row was confirmed";

/// Activation error recorded when a pass stops before activation is confirmed
pub const INTERRUPTED_ACTIVATION_ERROR: &str =
    "Processing stopped before batch activation was confirmed";

#[derive(Debug, Clone)]
struct BatchState {
    batch_id: Uuid,
    status: BatchStatus,
    total: usize,
    started_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    processing_time: Option<Duration>,
    batch_activated: Option<bool>,
    activation_error: Option<String>,
    outcomes: BTreeMap<usize, RowOutcome>,
    // Keyed by the same ordinals as the failed entries of `outcomes`
    failed_rows: BTreeMap<usize, HospitalRow>,
}

impl BatchState {
    fn new(batch_id: Uuid, total: usize) -> Self {
        let now = Utc::now();
        Self {
            batch_id,
            status: BatchStatus::Processing,
            total,
            started_at: now,
            updated_at: now,
            processing_time: None,
            batch_activated: None,
            activation_error: None,
            outcomes: BTreeMap::new(),
            failed_rows: BTreeMap::new(),
        }
    }

    fn counts(&self) -> (usize, usize) {
        self.outcomes
            .values()
            .fold((0, 0), |(processed, failed), outcome| {
                if outcome.status.is_success() {
                    (processed + 1, failed)
                } else {
                    (processed, failed + 1)
                }
            })
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn snapshot(&self) -> BatchSnapshot {
        let (processed, failed) = self.counts();
        BatchSnapshot {
            batch_id: self.batch_id,
            status: self.status,
            total: self.total,
            processed,
            failed,
            started_at: self.started_at,
            updated_at: self.updated_at,
            processing_time: self.processing_time,
            batch_activated: self.batch_activated,
            activation_error: self.activation_error.clone(),
            hospitals: self.outcomes.values().cloned().collect(),
        }
    }

    fn terminal_status(&self) -> BatchStatus {
        let (_, failed) = self.counts();
        if failed > 0 {
            BatchStatus::CompletedWithFailures
        } else if self.batch_activated == Some(false)
            && self.activation_error.as_deref().is_some_and(|e| !e.is_empty())
        {
            BatchStatus::CompletedActivationFailed
        } else {
            BatchStatus::Completed
        }
    }
}

/// Concurrency-safe table of batch state
#[derive(Debug, Default)]
pub struct BatchStore {
    batches: RwLock<HashMap<Uuid, BatchState>>,
}

impl BatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every tracked batch
    pub async fn reset(&self) {
        self.batches.write().await.clear();
    }

    /// Number of tracked batches
    pub async fn len(&self) -> usize {
        self.batches.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.batches.read().await.is_empty()
    }

    /// Identifiers of every tracked batch, oldest first
    pub async fn batch_ids(&self) -> Vec<Uuid> {
        let batches = self.batches.read().await;
        let mut ids: Vec<(DateTime<Utc>, Uuid)> = batches
            .values()
            .map(|state| (state.started_at, state.batch_id))
            .collect();
        ids.sort();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    /// Open a new batch in `processing`
    pub async fn begin(&self, batch_id: Uuid, total: usize) -> Result<()> {
        let mut batches = self.batches.write().await;
        if batches.contains_key(&batch_id) {
            return Err(BulkError::conflict(format!(
                "Batch {} already exists",
                batch_id
            )));
        }
        batches.insert(batch_id, BatchState::new(batch_id, total));
        debug!(batch_id = %batch_id, total, "Batch opened");
        Ok(())
    }

    /// Reopen a finished batch for resubmission of its failed rows
    ///
    /// Returns the failed rows captured under the same lock as the transition,
    /// so two concurrent resumes can never both receive the working set.
    pub async fn start_resume(&self, batch_id: Uuid) -> Result<Vec<HospitalRow>> {
        let mut batches = self.batches.write().await;
        let state = batches
            .get_mut(&batch_id)
            .ok_or(BulkError::BatchNotFound(batch_id))?;

        if state.status.is_in_flight() {
            return Err(BulkError::conflict(format!(
                "Batch {} is already {}",
                batch_id, state.status
            )));
        }
        if state.failed_rows.is_empty() {
            return Err(BulkError::NoFailedRows(batch_id));
        }

        state.status = BatchStatus::Resuming;
        state.touch();
        Ok(state.failed_rows.values().cloned().collect())
    }

    /// Reopen a batch whose rows all succeeded but whose activation failed
    pub async fn begin_activation_retry(&self, batch_id: Uuid) -> Result<()> {
        let mut batches = self.batches.write().await;
        let state = batches
            .get_mut(&batch_id)
            .ok_or(BulkError::BatchNotFound(batch_id))?;

        if state.status != BatchStatus::CompletedActivationFailed {
            return Err(BulkError::conflict(format!(
                "Batch {} is {}; only batches with a failed activation can retry it",
                batch_id, state.status
            )));
        }

        state.status = BatchStatus::Resuming;
        state.touch();
        Ok(())
    }

    /// Upsert a row outcome and keep the failed-row working set in step
    ///
    /// A failed outcome needs its source row, either passed here or already
    /// held from an earlier failure of the same ordinal.
    pub async fn record_row(
        &self,
        batch_id: Uuid,
        outcome: RowOutcome,
        source_row: Option<HospitalRow>,
    ) -> Result<()> {
        let mut batches = self.batches.write().await;
        let state = batches
            .get_mut(&batch_id)
            .ok_or(BulkError::BatchNotFound(batch_id))?;

        let ordinal = outcome.row;
        if ordinal == 0 || ordinal > state.total {
            return Err(BulkError::internal(format!(
                "Row {} is outside batch {} of {} rows",
                ordinal, batch_id, state.total
            )));
        }
        if let Some(source) = &source_row {
            if source.row_number != ordinal {
                return Err(BulkError::internal(format!(
                    "Source row {} does not match outcome row {}",
                    source.row_number, ordinal
                )));
            }
        }

        if outcome.is_failed() {
            match source_row {
                Some(source) => {
                    state.failed_rows.insert(ordinal, source);
                }
                None if state.failed_rows.contains_key(&ordinal) => {}
                None => {
                    return Err(BulkError::internal(format!(
                        "Failed row {} of batch {} has no source row",
                        ordinal, batch_id
                    )));
                }
            }
        } else {
            state.failed_rows.remove(&ordinal);
        }

        state.outcomes.insert(ordinal, outcome);
        state.touch();
        Ok(())
    }

    /// Record a successful activation and promote created rows
    pub async fn mark_activated(&self, batch_id: Uuid) -> Result<()> {
        let mut batches = self.batches.write().await;
        let state = batches
            .get_mut(&batch_id)
            .ok_or(BulkError::BatchNotFound(batch_id))?;

        for outcome in state.outcomes.values_mut() {
            if outcome.status == RowStatus::Created {
                outcome.status = RowStatus::CreatedAndActivated;
            }
        }
        state.batch_activated = Some(true);
        state.activation_error = None;
        state.touch();
        Ok(())
    }

    /// Record a failed activation; row outcomes stay as they are
    pub async fn mark_activation_failure(&self, batch_id: Uuid, message: &str) -> Result<()> {
        let mut batches = self.batches.write().await;
        let state = batches
            .get_mut(&batch_id)
            .ok_or(BulkError::BatchNotFound(batch_id))?;

        state.batch_activated = Some(false);
        state.activation_error = Some(message.to_string());
        state.touch();
        Ok(())
    }

    /// Close a processing pass and return the resulting snapshot
    pub async fn complete(&self, batch_id: Uuid, elapsed: Duration) -> Result<BatchSnapshot> {
        let mut batches = self.batches.write().await;
        let state = batches
            .get_mut(&batch_id)
            .ok_or(BulkError::BatchNotFound(batch_id))?;

        state.processing_time = Some(state.processing_time.unwrap_or_default() + elapsed);
        state.status = state.terminal_status();
        state.touch();
        Ok(state.snapshot())
    }

    /// Close a pass that stopped before reaching [`BatchStore::complete`]
    ///
    /// Rows of `pending` without an outcome are recorded as failed so a resume
    /// submits them. When every row exists but activation was never confirmed,
    /// the batch ends in `completed_activation_failed`. A batch that is not in
    /// flight is returned unchanged.
    pub async fn abandon(
        &self,
        batch_id: Uuid,
        pending: &[HospitalRow],
        elapsed: Duration,
    ) -> Result<BatchSnapshot> {
        let mut batches = self.batches.write().await;
        let state = batches
            .get_mut(&batch_id)
            .ok_or(BulkError::BatchNotFound(batch_id))?;

        if !state.status.is_in_flight() {
            return Ok(state.snapshot());
        }

        for row in pending {
            let ordinal = row.row_number;
            if ordinal == 0 || ordinal > state.total || state.outcomes.contains_key(&ordinal) {
                continue;
            }
            state
                .outcomes
                .insert(ordinal, RowOutcome::failed(row, INTERRUPTED_ROW_ERROR));
            state.failed_rows.insert(ordinal, row.clone());
        }

        let (_, failed) = state.counts();
        if failed == 0 && state.total > 0 && state.batch_activated != Some(true) {
            state.batch_activated = Some(false);
            state.activation_error = Some(INTERRUPTED_ACTIVATION_ERROR.to_string());
        }

        state.processing_time = Some(state.processing_time.unwrap_or_default() + elapsed);
        state.status = state.terminal_status();
        state.touch();
        debug!(batch_id = %batch_id, status = %state.status, "Interrupted batch closed");
        Ok(state.snapshot())
    }

    /// Copy of the batch, or `None` when it is unknown
    pub async fn get_snapshot(&self, batch_id: Uuid) -> Option<BatchSnapshot> {
        self.batches
            .read()
            .await
            .get(&batch_id)
            .map(BatchState::snapshot)
    }

    /// Copy of the rows currently marked failed, in ordinal order
    pub async fn get_failed_rows(&self, batch_id: Uuid) -> Result<Vec<HospitalRow>> {
        self.batches
            .read()
            .await
            .get(&batch_id)
            .map(|state| state.failed_rows.values().cloned().collect())
            .ok_or(BulkError::BatchNotFound(batch_id))
    }
}
