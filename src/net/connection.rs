//! Accepted connections.
//!
//! # Responsibilities
//! - Generate unique connection IDs for tracing
//! - Own the per-connection descriptor for one loop iteration
//! - Receive with a timeout, send, and close in order

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use socket2::Socket;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique tag attached to a connection's log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub(crate) fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// One accepted connection.
///
/// The descriptor is closed when this value is dropped.
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    socket: Socket,
    peer: Option<SocketAddr>,
}

impl Connection {
    pub(crate) fn new(socket: Socket, peer: Option<SocketAddr>) -> Self {
        Self {
            id: ConnectionId::next(),
            socket,
            peer,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// Bound how long `receive` may block.
    pub fn set_receive_timeout(&self, timeout: Duration) -> std::io::Result<()> {
        self.socket.set_read_timeout(Some(timeout))
    }

    pub fn receive_timeout(&self) -> std::io::Result<Option<Duration>> {
        self.socket.read_timeout()
    }

    /// One blocking read into `buf`. `Ok(0)` means the peer closed.
    pub fn receive(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        (&self.socket).read(buf)
    }

    pub fn send_all(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        (&self.socket).write_all(bytes)?;
        (&self.socket).flush()
    }

    /// Shut down both directions, then release the descriptor.
    pub fn close(self) {
        if let Err(e) = self.socket.shutdown(Shutdown::Both) {
            // Peer may already be gone; the descriptor is still released below.
            tracing::debug!(connection_id = %self.id, error = %e, "Shutdown failed");
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        tracing::trace!(connection_id = %self.id, "Connection closed");
    }
}
