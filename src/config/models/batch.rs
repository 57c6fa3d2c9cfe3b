//! Batch processing configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Limits and tracking mode for bulk uploads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of data rows accepted per upload
    #[serde(default = "default_row_limit")]
    pub row_limit: usize,
    /// Keep batch state so uploads can be queried and resumed
    #[serde(default = "default_true")]
    pub track_batches: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            row_limit: default_row_limit(),
            track_batches: true,
        }
    }
}

impl BatchConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if other.row_limit != default_row_limit() {
            self.row_limit = other.row_limit;
        }
        if !other.track_batches {
            self.track_batches = false;
        }
        self
    }
}
