//! Configuration management for the bulk service
//!
//! This module handles loading, validation, and management of all service configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{BulkError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the bulk service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BulkError::Config(format!("Failed to read config file: {}", e)))?;

        let service: ServiceConfig = serde_yaml::from_str(&content)
            .map_err(|e| BulkError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { service };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment overrides from {:?}", path);
        }

        let service = ServiceConfig::from_env()?;
        let config = Self { service };

        config.validate()?;
        Ok(config)
    }

    /// Load the file when given, overlaid with the environment
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let env = Self::from_env()?;
        match path {
            Some(path) => {
                let config = Self::from_file(path).await?.merge(env);
                config.validate()?;
                Ok(config)
            }
            None => Ok(env),
        }
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.service.server
    }

    /// Get Hospital Directory API configuration
    pub fn upstream(&self) -> &UpstreamConfig {
        &self.service.upstream
    }

    /// Get batch configuration
    pub fn batch(&self) -> &BatchConfig {
        &self.service.batch
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.service
            .server
            .validate()
            .map_err(|e| BulkError::Config(format!("Server config error: {}", e)))?;

        self.service
            .server
            .cors
            .validate()
            .map_err(|e| BulkError::Config(format!("CORS config error: {}", e)))?;

        self.service
            .upstream
            .validate()
            .map_err(|e| BulkError::Config(format!("Upstream config error: {}", e)))?;

        self.service
            .batch
            .validate()
            .map_err(|e| BulkError::Config(format!("Batch config error: {}", e)))?;

        self.service.server.cors.warn_if_permissive();

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.service = self.service.merge(other.service);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.service)
            .map_err(|e| BulkError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
