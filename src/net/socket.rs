//! Socket creation.
//!
//! # Responsibilities
//! - Translate a `SocketSpec` into an OS socket
//! - Build the address the socket will be associated with
//! - Own the descriptor for the rest of the chain

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};
use socket2::{Domain, Protocol, Socket, Type};

use crate::net::error::SetupError;

/// Protocol family of a socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    fn domain(self) -> Domain {
        match self {
            AddressFamily::Ipv4 => Domain::IPV4,
            AddressFamily::Ipv6 => Domain::IPV6,
        }
    }

    /// Whether `ip` belongs to this family.
    pub fn matches(self, ip: &IpAddr) -> bool {
        matches!(
            (self, ip),
            (AddressFamily::Ipv4, IpAddr::V4(_)) | (AddressFamily::Ipv6, IpAddr::V6(_))
        )
    }
}

/// Transport type of a socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Stream,
    Datagram,
}

impl Transport {
    fn socket_type(self) -> Type {
        match self {
            Transport::Stream => Type::STREAM,
            Transport::Datagram => Type::DGRAM,
        }
    }
}

/// Everything needed to create a socket and its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketSpec {
    pub family: AddressFamily,
    pub transport: Transport,
    /// Protocol number; 0 lets the OS pick the default for the transport.
    pub protocol: i32,
    pub interface: IpAddr,
    pub port: u16,
    pub reuse_address: bool,
}

impl SocketSpec {
    /// IPv4 stream socket on `interface:port` with the default protocol.
    pub fn tcp_v4(interface: Ipv4Addr, port: u16) -> Self {
        Self {
            family: AddressFamily::Ipv4,
            transport: Transport::Stream,
            protocol: 0,
            interface: IpAddr::V4(interface),
            port,
            reuse_address: false,
        }
    }

    /// The address structure; `SockAddr` stores port and interface in
    /// network byte order.
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.interface, self.port)
    }

    fn protocol(&self) -> Option<Protocol> {
        match self.protocol {
            0 => None,
            n => Some(Protocol::from(n)),
        }
    }
}

impl Default for SocketSpec {
    fn default() -> Self {
        Self::tcp_v4(Ipv4Addr::UNSPECIFIED, 3000)
    }
}

/// An OS socket descriptor plus the address it was created for.
///
/// A value of this type always holds a valid descriptor.
#[derive(Debug)]
pub struct SocketHandle {
    socket: Socket,
    address: SocketAddr,
}

impl SocketHandle {
    /// Create the OS socket described by `spec`.
    pub fn create(spec: &SocketSpec) -> Result<Self, SetupError> {
        let socket = Socket::new(
            spec.family.domain(),
            spec.transport.socket_type(),
            spec.protocol(),
        )
        .map_err(SetupError::Create)?;

        if spec.reuse_address {
            socket
                .set_reuse_address(true)
                .map_err(|source| SetupError::SocketOption {
                    option: "SO_REUSEADDR",
                    source,
                })?;
        }

        tracing::debug!(
            family = ?spec.family,
            transport = ?spec.transport,
            protocol = spec.protocol,
            "Socket created"
        );

        Ok(Self {
            socket,
            address: spec.address(),
        })
    }

    pub fn socket(&self) -> &Socket {
        &self.socket
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub(crate) fn into_socket(self) -> Socket {
        self.socket
    }
}
