//! Common test utilities for hospital-bulk
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{MockDirectory, fixtures::CsvFactory};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let directory = MockDirectory::start().await;
//!     let processor = directory.processor(20);
//!     let result = processor.process_upload(CsvFactory::two_hospitals().as_bytes()).await;
//!     // ...
//! }
//! ```

pub mod assertions;
pub mod directory;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::BatchResultAssertions;
pub use directory::MockDirectory;
pub use fixtures::{CsvFactory, MultipartFactory};
