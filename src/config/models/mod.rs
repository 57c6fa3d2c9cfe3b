//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

#![allow(missing_docs)]

pub mod batch;
pub mod server;
pub mod service;
pub mod upstream;

// Re-export all configuration types
pub use batch::*;
pub use server::*;
pub use service::*;
pub use upstream::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

/// Default Hospital Directory API location
pub fn default_base_url() -> String {
    "https://hospital-directory.onrender.com".to_string()
}

/// Default outbound request timeout in seconds
pub fn default_outbound_timeout() -> f64 {
    10.0
}

/// Default maximum number of data rows per upload
pub fn default_row_limit() -> usize {
    20
}

pub fn default_true() -> bool {
    true
}
