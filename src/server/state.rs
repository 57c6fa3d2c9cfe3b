//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::batch::BulkProcessor;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc so every worker shares the same processor,
/// and with it the same batch store.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Bulk upload processor
    pub processor: Arc<BulkProcessor>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, processor: BulkProcessor) -> Self {
        Self {
            config: Arc::new(config),
            processor: Arc::new(processor),
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
