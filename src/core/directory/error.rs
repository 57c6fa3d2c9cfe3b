//! Error type for Hospital Directory calls

use thiserror::Error;

/// Detail used when the upstream gives no usable message
pub const DEFAULT_REMOTE_DETAIL: &str = "Remote API call failed";

/// Normalized failure of a create or activate call
///
/// `status_code` is the HTTP status, or 0 when the request never produced a
/// response (connect error, timeout, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{status_code}] {detail}")]
pub struct RemoteError {
    pub status_code: u16,
    pub detail: String,
}

impl RemoteError {
    pub fn new(status_code: u16, detail: Option<String>) -> Self {
        Self {
            status_code,
            detail: detail
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_REMOTE_DETAIL.to_string()),
        }
    }

    /// Failure below the HTTP layer
    pub fn transport<S: Into<String>>(detail: S) -> Self {
        Self::new(0, Some(detail.into()))
    }

    pub fn is_transport(&self) -> bool {
        self.status_code == 0
    }

    /// Extract a detail message from an error response body
    ///
    /// JSON bodies contribute their `detail` field (a string, or the first entry
    /// of a non-empty list); non-JSON bodies contribute their raw text.
    pub fn from_response_body(status_code: u16, body: &str) -> Self {
        let detail = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(map)) => match map.get("detail") {
                Some(serde_json::Value::String(detail)) => Some(detail.clone()),
                Some(serde_json::Value::Array(items)) => items.first().map(|first| match first {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                }),
                _ => None,
            },
            Ok(_) => None,
            Err(_) => Some(body.to_string()),
        };
        Self::new(status_code, detail)
    }
}
