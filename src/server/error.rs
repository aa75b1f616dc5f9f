//! Per-connection errors.

use thiserror::Error;

use crate::server::pipeline::Stage;

/// Failures confined to a single loop iteration.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Accept failed: {0}")]
    Accept(#[source] std::io::Error),

    #[error("Read failed: {0}")]
    Receive(#[source] std::io::Error),

    #[error("No data received before the receive timeout")]
    ReceiveTimeout,

    #[error("Client closed connection")]
    PeerClosed,

    #[error("Failed to send response: {0}")]
    Send(#[source] std::io::Error),
}

impl ConnectionError {
    /// Map a read error, separating timeouts from other failures.
    pub fn from_receive(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut => {
                ConnectionError::ReceiveTimeout
            }
            _ => ConnectionError::Receive(err),
        }
    }

    /// The stage in which the error happened.
    pub fn stage(&self) -> Stage {
        match self {
            ConnectionError::Accept(_)
            | ConnectionError::Receive(_)
            | ConnectionError::ReceiveTimeout
            | ConnectionError::PeerClosed => Stage::Accepting,
            ConnectionError::Send(_) => Stage::Responding,
        }
    }
}
