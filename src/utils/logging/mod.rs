//! Logging setup
//!
//! Installs the global `tracing` subscriber used by the service binary.

use crate::utils::error::{BulkError, Result};
use tracing_subscriber::EnvFilter;

/// Default filter directive when neither `RUST_LOG` nor `LOG_LEVEL` is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format of the subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Pick the filter directive: `RUST_LOG` wins, then `LOG_LEVEL`, then the default
pub fn resolve_filter(rust_log: Option<String>, log_level: Option<String>) -> String {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            log_level
                .filter(|value| !value.trim().is_empty())
                .map(|value| match value.trim().to_lowercase().as_str() {
                    "warning" => "warn".to_string(),
                    "critical" | "fatal" => "error".to_string(),
                    level => level.to_string(),
                })
        })
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Initialize the global subscriber from the process environment
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let directive = resolve_filter(
        std::env::var("RUST_LOG").ok(),
        std::env::var("LOG_LEVEL").ok(),
    );
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| BulkError::config(format!("Invalid log filter '{}': {}", directive, e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| BulkError::internal(format!("Failed to install subscriber: {}", e)))
}
