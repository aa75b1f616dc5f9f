//! Socket setup errors.

use std::net::SocketAddr;
use thiserror::Error;

/// Errors raised while building the socket chain.
///
/// None of these are recoverable inside the library; the caller decides
/// whether to abort.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The OS refused to create the socket.
    #[error("Failed to create socket: {0}")]
    Create(#[source] std::io::Error),

    /// A socket option could not be applied to the new socket.
    #[error("Failed to set socket option {option}: {source}")]
    SocketOption {
        option: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The socket could not be bound to its address.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The socket could not connect to its address.
    #[error("Failed to connect to {address}: {source}")]
    Connect {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The bound socket could not be marked passive.
    #[error("Failed to listen with backlog {backlog}: {source}")]
    Listen {
        backlog: i32,
        #[source]
        source: std::io::Error,
    },
}

impl SetupError {
    /// Underlying OS error.
    pub fn io_error(&self) -> &std::io::Error {
        match self {
            SetupError::Create(e) => e,
            SetupError::SocketOption { source, .. }
            | SetupError::Bind { source, .. }
            | SetupError::Connect { source, .. }
            | SetupError::Listen { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn socket_option_failure_is_not_a_create_failure() {
        let err = SetupError::SocketOption {
            option: "SO_REUSEADDR",
            source: Error::from(ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().starts_with("Failed to set socket option SO_REUSEADDR: "));
        assert_eq!(err.io_error().kind(), ErrorKind::PermissionDenied);
    }
}
