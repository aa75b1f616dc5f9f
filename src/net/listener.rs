//! Passive TCP listener on a raw socket.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Mark the socket passive with a bounded backlog
//! - Accept incoming connections, one call at a time

use std::net::SocketAddr;

use socket2::Socket;

use crate::net::association::{local_socket_addr, AssociatedSocket};
use crate::net::connection::Connection;
use crate::net::error::SetupError;
use crate::net::socket::SocketSpec;

/// A bound socket that is listening for connections.
#[derive(Debug)]
pub struct ListeningSocket {
    socket: Socket,
    backlog: i32,
}

impl ListeningSocket {
    /// Bind `spec` and start listening with `backlog` pending connections.
    pub fn open(spec: &SocketSpec, backlog: i32) -> Result<Self, SetupError> {
        let bound = AssociatedSocket::bind(spec)?;
        Self::from_bound(bound, backlog)
    }

    /// Start listening on an already bound socket.
    pub fn from_bound(bound: AssociatedSocket, backlog: i32) -> Result<Self, SetupError> {
        let handle = bound.into_handle();
        let address = handle.address();
        let socket = handle.into_socket();

        socket
            .listen(backlog)
            .map_err(|source| SetupError::Listen { backlog, source })?;

        tracing::info!(address = %address, backlog, "Listener bound");

        Ok(Self { socket, backlog })
    }

    /// Block until a client connects. There is no timeout on this call.
    pub fn accept(&self) -> std::io::Result<Connection> {
        let (socket, peer) = self.socket.accept()?;
        let peer = peer.as_socket();

        tracing::debug!(
            peer_addr = ?peer,
            "Connection accepted"
        );

        Ok(Connection::new(socket, peer))
    }

    pub fn backlog(&self) -> i32 {
        self.backlog
    }

    /// Always true: a `ListeningSocket` only exists once `listen` succeeded.
    pub fn is_listening(&self) -> bool {
        true
    }

    /// Address the OS actually bound.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        local_socket_addr(&self.socket)
    }
}
