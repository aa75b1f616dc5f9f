//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::net::{AddressFamily, SocketSpec, Transport};

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listening socket settings.
    pub listener: ListenerConfig,

    /// Per-connection settings.
    pub connection: ConnectionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Protocol family ("ipv4" or "ipv6").
    pub family: AddressFamily,

    /// Transport type ("stream" or "datagram").
    pub transport: Transport,

    /// Protocol number, 0 for the transport's default.
    pub protocol: i32,

    /// Interface to bind (e.g., "0.0.0.0" for any).
    pub interface: IpAddr,

    /// Port to bind.
    pub port: u16,

    /// Maximum pending connections queued by the OS.
    pub backlog: i32,

    /// Set SO_REUSEADDR before binding.
    pub reuse_address: bool,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            family: AddressFamily::Ipv4,
            transport: Transport::Stream,
            protocol: 0,
            interface: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            backlog: 10,
            reuse_address: false,
        }
    }
}

impl ListenerConfig {
    pub fn socket_spec(&self) -> SocketSpec {
        SocketSpec {
            family: self.family,
            transport: self.transport,
            protocol: self.protocol,
            interface: self.interface,
            port: self.port,
            reuse_address: self.reuse_address,
        }
    }
}

/// Per-connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Receive buffer size in bytes; one read per connection.
    pub buffer_capacity: usize,

    /// Receive timeout in seconds.
    pub receive_timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 30_000,
            receive_timeout_secs: 5,
        }
    }
}

impl ConnectionConfig {
    pub fn receive_timeout(&self) -> Duration {
        Duration::from_secs(self.receive_timeout_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
