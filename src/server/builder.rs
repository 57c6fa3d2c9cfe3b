//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function used by the binary.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{BulkError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| BulkError::Config("Configuration is required".to_string()))?;

        config.validate()?;
        HttpServer::new(&config)
    }
}

/// Run the server with the given configuration until it stops
pub async fn run_server(config: Config) -> Result<()> {
    info!(
        "Starting {} v{} on http://{}",
        crate::NAME,
        crate::VERSION,
        config.server().address()
    );
    info!(
        base_url = %config.upstream().base_url,
        row_limit = config.batch().row_limit,
        track_batches = config.batch().track_batches,
        "Hospital Directory settings"
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /hospitals/bulk - Upload a hospital CSV");
    info!("   GET  /hospitals/bulk/{{batch_id}} - Batch progress");
    info!("   POST /hospitals/bulk/{{batch_id}}/resume - Retry failed rows");
    info!("   POST /hospitals/bulk/{{batch_id}}/activate - Retry batch activation");

    let server = ServerBuilder::new().with_config(config).build()?;
    server.start().await
}
