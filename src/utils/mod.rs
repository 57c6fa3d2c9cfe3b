//! Utility modules for the bulk service
//!
//! - **error**: Error handling and HTTP error mapping
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;
