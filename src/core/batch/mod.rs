//! Batch processing for bulk hospital uploads
//!
//! This module provides the batch data model, the in-memory batch store and the
//! processor that drives uploads, resumes and activation retries.

mod processor;
mod store;
mod types;


// Re-export all public types
pub use processor::{BulkProcessor, StoreMode};
pub use store::BatchStore;
pub use types::{
    BatchProgress, BatchResult, BatchSnapshot, BatchStatus, RowOutcome, RowStatus, round_seconds,
};
