//! # hospital-bulk
//!
//! Bulk CSV ingestion service for the Hospital Directory API.
//!
//! An upload is validated as a whole, every row is created upstream under a
//! fresh batch identifier, and the batch is activated once every row exists.
//! Rows that fail stay attached to the batch so a later resume resubmits only
//! those rows.
//!
//! ## Features
//!
//! - **CSV validation**: header and per-row checks with structured errors
//! - **Batch tracking**: in-memory progress with resume of failed rows
//! - **Activation retry**: re-run activation for batches whose rows all exist
//! - **HTTP API**: Actix-web endpoints for upload, progress and resume
//!
//! ## Embedding the processor
//!
//! ```rust,no_run
//! use hospital_bulk::{BatchStore, BulkProcessor, Config, HttpClientFactory, StoreMode};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let processor = BulkProcessor::new(
//!         config.batch().row_limit,
//!         Arc::new(HttpClientFactory::new(config.upstream().clone())),
//!         StoreMode::Tracked(Arc::new(BatchStore::new())),
//!     );
//!
//!     let result = processor
//!         .process_upload(b"name,address\nGeneral Hospital,1 Main St\n")
//!         .await?;
//!     println!("batch {} created {} rows", result.batch_id, result.processed_hospitals);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::batch::{
    BatchProgress, BatchResult, BatchSnapshot, BatchStatus, BatchStore, BulkProcessor, RowOutcome,
    RowStatus, StoreMode,
};
pub use core::csv::{CsvRowError, HospitalRow, parse_hospital_csv};
pub use core::directory::{
    ClientFactory, CreatedHospital, DirectoryClient, HttpClientFactory, HttpDirectoryClient,
    NewHospital, RemoteError,
};
pub use utils::error::{BulkError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
