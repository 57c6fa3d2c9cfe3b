//! Service configuration

use super::*;
use crate::utils::error::{BulkError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Environment variable holding the Hospital Directory API base URL
pub const ENV_BASE_URL: &str = "HOSPITAL_DIRECTORY_API_BASE_URL";
/// Environment variable holding the per-upload row limit
pub const ENV_ROW_LIMIT: &str = "BATCH_SIZE_LIMIT";
/// Environment variable holding the outbound timeout in seconds
pub const ENV_OUTBOUND_TIMEOUT: &str = "OUTBOUND_TIMEOUT_SECONDS";
pub const ENV_HOST: &str = "BULK_HOST";
pub const ENV_PORT: &str = "BULK_PORT";
pub const ENV_WORKERS: &str = "BULK_WORKERS";
pub const ENV_TRACK_BATCHES: &str = "BULK_TRACK_BATCHES";

/// Top-level service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Hospital Directory API configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Bulk upload limits
    #[serde(default)]
    pub batch: BatchConfig,
}

impl ServiceConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Unset or blank keys keep their defaults; values that fail to parse are
    /// configuration errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(host) = get(ENV_HOST) {
            config.server.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            config.server.port = parse_value(ENV_PORT, &port)?;
        }
        if let Some(workers) = get(ENV_WORKERS) {
            config.server.workers = Some(parse_value(ENV_WORKERS, &workers)?);
        }
        if let Some(base_url) = get(ENV_BASE_URL) {
            config.upstream.base_url = base_url;
        }
        if let Some(timeout) = get(ENV_OUTBOUND_TIMEOUT) {
            config.upstream.timeout_seconds = parse_value(ENV_OUTBOUND_TIMEOUT, &timeout)?;
        }
        if let Some(limit) = get(ENV_ROW_LIMIT) {
            config.batch.row_limit = parse_value(ENV_ROW_LIMIT, &limit)?;
        }
        if let Some(track) = get(ENV_TRACK_BATCHES) {
            config.batch.track_batches = parse_bool(ENV_TRACK_BATCHES, &track)?;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.upstream = self.upstream.merge(other.upstream);
        self.batch = self.batch.merge(other.batch);
        self
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| BulkError::config(format!("Invalid value for {}: {} ({})", key, raw, e)))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(BulkError::config(format!(
            "Invalid value for {}: {} (expected a boolean)",
            key, raw
        ))),
    }
}
