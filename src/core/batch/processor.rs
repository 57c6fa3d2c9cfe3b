//! Bulk upload orchestration
//!
//! Drives one upload from raw CSV bytes through row creation and batch
//! activation, and re-drives the failed rows of an earlier upload on resume.

use super::store::BatchStore;
use super::types::{BatchResult, BatchSnapshot, RowOutcome};
use crate::core::csv::{HospitalRow, parse_hospital_csv};
use crate::core::directory::{ClientFactory, DirectoryClient, NewHospital};
use crate::utils::error::{BulkError, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Where batch state lives for a processor
#[derive(Debug, Clone)]
pub enum StoreMode {
    /// Batches are kept in a shared store and can be queried and resumed
    Tracked(Arc<BatchStore>),
    /// Each upload uses a private store that is dropped with the result
    Ephemeral,
}

/// Bulk upload processor
pub struct BulkProcessor {
    row_limit: usize,
    client_factory: Arc<dyn ClientFactory>,
    store: StoreMode,
}

impl BulkProcessor {
    /// Create a new processor
    pub fn new(row_limit: usize, client_factory: Arc<dyn ClientFactory>, store: StoreMode) -> Self {
        Self {
            row_limit,
            client_factory,
            store,
        }
    }

    /// Maximum number of data rows accepted per upload
    pub fn row_limit(&self) -> usize {
        self.row_limit
    }

    /// The shared store, when batches are tracked
    pub fn store(&self) -> Option<&Arc<BatchStore>> {
        match &self.store {
            StoreMode::Tracked(store) => Some(store),
            StoreMode::Ephemeral => None,
        }
    }

    fn tracked_store(&self) -> Result<&Arc<BatchStore>> {
        self.store().ok_or(BulkError::StateUnavailable)
    }

    /// Validate an upload, create every row and activate the batch when all rows succeed
    pub async fn process_upload(&self, raw_bytes: &[u8]) -> Result<BatchResult> {
        let started = Instant::now();
        let rows = parse_hospital_csv(raw_bytes, self.row_limit)?;

        let store = match &self.store {
            StoreMode::Tracked(store) => Arc::clone(store),
            StoreMode::Ephemeral => Arc::new(BatchStore::new()),
        };

        let client = self.client_factory.acquire()?;
        let batch_id = Uuid::new_v4();
        store.begin(batch_id, rows.len()).await?;
        let pass = PassGuard::new(Arc::clone(&store), batch_id, rows.clone(), started);
        info!(batch_id = %batch_id, total = rows.len(), "Processing bulk upload");

        let outcome = upload_pass(&store, client.as_ref(), batch_id, &rows).await;
        drop(client);

        let snapshot = pass.finish(outcome).await?;
        info!(
            batch_id = %batch_id,
            status = %snapshot.status,
            processed = snapshot.processed,
            failed = snapshot.failed,
            "Bulk upload finished"
        );
        Ok(snapshot.into())
    }

    /// Resubmit only the rows that failed in earlier passes
    pub async fn resume(&self, batch_id: Uuid) -> Result<BatchResult> {
        let store = self.tracked_store()?;

        if store.get_snapshot(batch_id).await.is_none() {
            return Err(BulkError::BatchNotFound(batch_id));
        }
        if store.get_failed_rows(batch_id).await?.is_empty() {
            return Err(BulkError::NoFailedRows(batch_id));
        }

        let client = self.client_factory.acquire()?;
        let rows = store.start_resume(batch_id).await?;
        let pass = PassGuard::new(Arc::clone(store), batch_id, rows.clone(), Instant::now());
        info!(batch_id = %batch_id, rows = rows.len(), "Resuming batch");

        let outcome = resume_pass(store, client.as_ref(), batch_id, &rows).await;
        drop(client);

        let snapshot = pass.finish(outcome).await?;
        info!(
            batch_id = %batch_id,
            status = %snapshot.status,
            processed = snapshot.processed,
            failed = snapshot.failed,
            "Resume finished"
        );
        Ok(snapshot.into())
    }

    /// Re-attempt activation for a batch whose rows all exist upstream
    pub async fn retry_activation(&self, batch_id: Uuid) -> Result<BatchResult> {
        let store = self.tracked_store()?;

        if store.get_snapshot(batch_id).await.is_none() {
            return Err(BulkError::BatchNotFound(batch_id));
        }

        let client = self.client_factory.acquire()?;
        store.begin_activation_retry(batch_id).await?;
        let pass = PassGuard::new(Arc::clone(store), batch_id, Vec::new(), Instant::now());
        info!(batch_id = %batch_id, "Retrying batch activation");

        let outcome = activate(store, client.as_ref(), batch_id).await;
        drop(client);

        let snapshot = pass.finish(outcome).await?;
        Ok(snapshot.into())
    }
}

/// Brings an in-flight batch back to a terminal status
///
/// A pass ends through [`PassGuard::finish`]. If the pass future is dropped
/// first (the HTTP client went away, the task was aborted), `Drop` closes the
/// batch on a spawned task instead, so it never stays `processing` or
/// `resuming` and its failed rows remain resumable.
struct PassGuard {
    store: Arc<BatchStore>,
    batch_id: Uuid,
    pending: Vec<HospitalRow>,
    started: Instant,
    armed: bool,
}

impl PassGuard {
    fn new(
        store: Arc<BatchStore>,
        batch_id: Uuid,
        pending: Vec<HospitalRow>,
        started: Instant,
    ) -> Self {
        Self {
            store,
            batch_id,
            pending,
            started,
            armed: true,
        }
    }

    /// Complete the batch after a clean pass, or close it and return the error
    async fn finish(mut self, outcome: Result<()>) -> Result<BatchSnapshot> {
        match outcome {
            Ok(()) => {
                let snapshot = self
                    .store
                    .complete(self.batch_id, self.started.elapsed())
                    .await?;
                self.armed = false;
                Ok(snapshot)
            }
            Err(e) => {
                error!(batch_id = %self.batch_id, error = %e, "Batch pass failed");
                let pending = std::mem::take(&mut self.pending);
                if let Err(close_err) = self
                    .store
                    .abandon(self.batch_id, &pending, self.started.elapsed())
                    .await
                {
                    error!(batch_id = %self.batch_id, error = %close_err, "Failed to close batch");
                }
                self.armed = false;
                Err(e)
            }
        }
    }
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let store = Arc::clone(&self.store);
        let batch_id = self.batch_id;
        let pending = std::mem::take(&mut self.pending);
        let elapsed = self.started.elapsed();
        warn!(batch_id = %batch_id, "Batch pass interrupted");

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = store.abandon(batch_id, &pending, elapsed).await {
                        error!(batch_id = %batch_id, error = %e, "Failed to close interrupted batch");
                    }
                });
            }
            Err(_) => {
                error!(batch_id = %batch_id, "No runtime left to close interrupted batch");
            }
        }
    }
}

async fn upload_pass(
    store: &BatchStore,
    client: &dyn DirectoryClient,
    batch_id: Uuid,
    rows: &[HospitalRow],
) -> Result<()> {
    let failures = submit_rows(store, client, batch_id, rows).await?;
    if failures == 0 && !rows.is_empty() {
        activate(store, client, batch_id).await
    } else {
        debug!(batch_id = %batch_id, failures, "Skipping activation");
        Ok(())
    }
}

async fn resume_pass(
    store: &BatchStore,
    client: &dyn DirectoryClient,
    batch_id: Uuid,
    rows: &[HospitalRow],
) -> Result<()> {
    submit_rows(store, client, batch_id, rows).await?;

    let updated = store
        .get_snapshot(batch_id)
        .await
        .ok_or(BulkError::BatchNotFound(batch_id))?;
    if updated.failed == 0 && updated.total > 0 {
        activate(store, client, batch_id).await?;
    }
    Ok(())
}

/// Submit rows in ordinal order, recording each outcome; returns the failure count
async fn submit_rows(
    store: &BatchStore,
    client: &dyn DirectoryClient,
    batch_id: Uuid,
    rows: &[HospitalRow],
) -> Result<usize> {
    let mut failures = 0;
    for row in rows {
        let outcome = process_row(client, batch_id, row).await;
        if outcome.is_failed() {
            failures += 1;
            store.record_row(batch_id, outcome, Some(row.clone())).await?;
        } else {
            store.record_row(batch_id, outcome, None).await?;
        }
    }
    Ok(failures)
}

async fn process_row(client: &dyn DirectoryClient, batch_id: Uuid, row: &HospitalRow) -> RowOutcome {
    match client
        .create_hospital(&NewHospital::from_row(row, batch_id))
        .await
    {
        Ok(created) => RowOutcome::created(row, created.id),
        Err(e) => {
            warn!(batch_id = %batch_id, row = row.row_number, error = %e, "Hospital creation failed");
            RowOutcome::failed(row, e.to_string())
        }
    }
}

async fn activate(store: &BatchStore, client: &dyn DirectoryClient, batch_id: Uuid) -> Result<()> {
    match client.activate_batch(batch_id).await {
        Ok(_) => {
            info!(batch_id = %batch_id, "Batch activated");
            store.mark_activated(batch_id).await
        }
        Err(e) => {
            warn!(batch_id = %batch_id, error = %e, "Batch activation failed");
            store.mark_activation_failure(batch_id, &e.to_string()).await
        }
    }
}
