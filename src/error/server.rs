// Server error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Server error code constants
///
/// Error code range: 2001-2003
pub struct ServerErrorCodes {}

impl ServerErrorCodes {
    /// Bind address could not be parsed as a socket address
    pub const INVALID_ADDRESS: i32 = 2001;

    /// TCP listener could not be bound
    pub const BIND_FAILED: i32 = 2002;

    /// HTTP serve loop terminated with an I/O error
    pub const SERVE_FAILED: i32 = 2003;
}

/// Log a server error with structured context
pub fn log_server_error(err: &ServerError, context: &str) {
    error!(
        "Server error in {}: code={}, component=HttpServer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors that stop the HTTP server from starting or running.
///
/// Request handling itself never produces one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerError {
    /// Bind address could not be parsed
    InvalidAddress { value: String, reason: String },

    /// Listener bind failed (port in use, permission denied, ...)
    Bind { addr: String, reason: String },

    /// Serve loop failed after startup
    Serve { reason: String },
}

impl ErrorCode for ServerError {
    fn code(&self) -> i32 {
        match self {
            ServerError::InvalidAddress { .. } => ServerErrorCodes::INVALID_ADDRESS,
            ServerError::Bind { .. } => ServerErrorCodes::BIND_FAILED,
            ServerError::Serve { .. } => ServerErrorCodes::SERVE_FAILED,
        }
    }

    fn message(&self) -> String {
        match self {
            ServerError::InvalidAddress { value, reason } => {
                format!("Invalid bind address '{}': {}", value, reason)
            }
            ServerError::Bind { addr, reason } => {
                format!("Failed to bind {}: {}", addr, reason)
            }
            ServerError::Serve { reason } => {
                format!("HTTP server stopped: {}", reason)
            }
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ServerError::{} (code {}): {}",
            self.variant_name(),
            self.code(),
            self.message()
        )
    }
}

impl ServerError {
    fn variant_name(&self) -> &'static str {
        match self {
            ServerError::InvalidAddress { .. } => "InvalidAddress",
            ServerError::Bind { .. } => "Bind",
            ServerError::Serve { .. } => "Serve",
        }
    }
}

impl std::error::Error for ServerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_codes() {
        assert_eq!(
            ServerError::InvalidAddress {
                value: "nope".to_string(),
                reason: "bad".to_string()
            }
            .code(),
            ServerErrorCodes::INVALID_ADDRESS
        );
        assert_eq!(
            ServerError::Bind {
                addr: "0.0.0.0:9091".to_string(),
                reason: "in use".to_string()
            }
            .code(),
            ServerErrorCodes::BIND_FAILED
        );
        assert_eq!(
            ServerError::Serve {
                reason: "reset".to_string()
            }
            .code(),
            ServerErrorCodes::SERVE_FAILED
        );
    }

    #[test]
    fn test_server_error_display() {
        let err = ServerError::InvalidAddress {
            value: "localhost".to_string(),
            reason: "invalid socket address syntax".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.starts_with("ServerError::InvalidAddress (code 2001)"));
        assert!(rendered.contains("'localhost'"));
    }

    #[test]
    fn test_server_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(ServerError::Serve {
            reason: "closed".to_string(),
        });
        assert!(err.to_string().contains("closed"));
    }
}
