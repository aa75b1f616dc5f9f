//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! SocketSpec (family, transport, protocol, interface, port)
//!     → socket.rs (create OS socket, build address)
//!     → association.rs (bind or connect, selected by AssociationKind)
//!     → listener.rs (listen with backlog, blocking accept)
//!     → connection.rs (one accepted descriptor per loop iteration)
//!     → Hand off to the server pipeline
//!
//! Setup stages:
//!     Created → Bound → Listening
//! ```
//!
//! # Design Decisions
//! - Each stage only exists if the previous one succeeded
//! - Setup failures are returned as `SetupError`, never terminate the process
//! - Descriptors are owned values; dropping one closes it

pub mod association;
pub mod connection;
pub mod error;
pub mod listener;
pub mod socket;

pub use association::{AssociatedSocket, AssociationKind};
pub use connection::{Connection, ConnectionId};
pub use error::SetupError;
pub use listener::ListeningSocket;
pub use socket::{AddressFamily, SocketHandle, SocketSpec, Transport};
