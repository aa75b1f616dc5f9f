//! Network association: bind or connect a created socket.
//!
//! # Responsibilities
//! - Select the association with `AssociationKind`
//! - Dispatch it through the `Associate` trait (`Binder`, `Connector`)
//! - Validate the result before handing the socket on
//!
//! A bound `AssociatedSocket` is the only input `ListeningSocket` accepts.

use std::net::SocketAddr;

use socket2::{SockAddr, Socket};

use crate::net::error::SetupError;
use crate::net::socket::{SocketHandle, SocketSpec};

/// Which association a socket goes through after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationKind {
    /// Attach to a local address (server side).
    Bind,
    /// Attach to a remote address (client side).
    Connect,
}

impl AssociationKind {
    fn associator(self) -> &'static dyn Associate {
        match self {
            AssociationKind::Bind => &Binder,
            AssociationKind::Connect => &Connector,
        }
    }
}

impl std::fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssociationKind::Bind => write!(f, "bind"),
            AssociationKind::Connect => write!(f, "connect"),
        }
    }
}

/// One way of associating a socket with its address.
pub trait Associate {
    fn kind(&self) -> AssociationKind;

    fn associate(&self, handle: &SocketHandle) -> std::io::Result<()>;
}

/// `bind(2)` the socket to its own address.
#[derive(Debug, Clone, Copy, Default)]
pub struct Binder;

impl Associate for Binder {
    fn kind(&self) -> AssociationKind {
        AssociationKind::Bind
    }

    fn associate(&self, handle: &SocketHandle) -> std::io::Result<()> {
        handle.socket().bind(&SockAddr::from(handle.address()))
    }
}

/// `connect(2)` the socket to a remote address.
#[derive(Debug, Clone, Copy, Default)]
pub struct Connector;

impl Associate for Connector {
    fn kind(&self) -> AssociationKind {
        AssociationKind::Connect
    }

    fn associate(&self, handle: &SocketHandle) -> std::io::Result<()> {
        handle.socket().connect(&SockAddr::from(handle.address()))
    }
}

/// A socket whose association succeeded.
#[derive(Debug)]
pub struct AssociatedSocket {
    handle: SocketHandle,
    kind: AssociationKind,
}

impl AssociatedSocket {
    /// Create a socket for `spec`, then associate it as `kind`.
    pub fn new(spec: &SocketSpec, kind: AssociationKind) -> Result<Self, SetupError> {
        let handle = SocketHandle::create(spec)?;
        let associator = kind.associator();

        if let Err(source) = associator.associate(&handle) {
            let address = handle.address();
            return Err(match associator.kind() {
                AssociationKind::Bind => SetupError::Bind { address, source },
                AssociationKind::Connect => SetupError::Connect { address, source },
            });
        }

        tracing::debug!(address = %handle.address(), association = %kind, "Socket associated");

        Ok(Self { handle, kind })
    }

    pub fn bind(spec: &SocketSpec) -> Result<Self, SetupError> {
        Self::new(spec, AssociationKind::Bind)
    }

    pub fn connect(spec: &SocketSpec) -> Result<Self, SetupError> {
        Self::new(spec, AssociationKind::Connect)
    }

    pub fn kind(&self) -> AssociationKind {
        self.kind
    }

    pub fn handle(&self) -> &SocketHandle {
        &self.handle
    }

    /// Address the OS actually assigned (resolves port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        local_socket_addr(self.handle.socket())
    }

    pub fn into_handle(self) -> SocketHandle {
        self.handle
    }
}

pub(crate) fn local_socket_addr(socket: &Socket) -> std::io::Result<SocketAddr> {
    socket.local_addr()?.as_socket().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "local address is not an IP socket address",
        )
    })
}
