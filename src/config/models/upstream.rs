//! Hospital Directory API configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Where and how to reach the Hospital Directory API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the API, without the `/hospitals` path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_outbound_timeout")]
    pub timeout_seconds: f64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_outbound_timeout(),
        }
    }
}

impl UpstreamConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if other.base_url != default_base_url() {
            self.base_url = other.base_url;
        }
        if other.timeout_seconds != default_outbound_timeout() {
            self.timeout_seconds = other.timeout_seconds;
        }
        self
    }
}
