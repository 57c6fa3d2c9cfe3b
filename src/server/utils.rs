//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::BulkError;

impl HttpServer {
    /// Format a readable error message for port binding failures
    pub(crate) fn format_bind_error(error: std::io::Error, bind_addr: &str, port: u16) -> BulkError {
        let error_str = error.to_string();

        if error.kind() == std::io::ErrorKind::AddrInUse
            || error_str.contains("Address already in use")
            || error_str.contains("os error 48")
            || error_str.contains("os error 98")
        {
            BulkError::server(format!(
                "Port {} is already in use; stop the other process or set BULK_PORT (e.g. --port {})",
                port,
                port.saturating_add(1)
            ))
        } else if error.kind() == std::io::ErrorKind::PermissionDenied
            || error_str.contains("os error 13")
        {
            BulkError::server(format!(
                "Permission denied for port {}; use a port >= 1024",
                port
            ))
        } else {
            BulkError::server(format!("Failed to bind to {}: {}", bind_addr, error))
        }
    }
}
