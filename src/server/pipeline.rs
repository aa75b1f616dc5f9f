//! The accept/handle/respond contract and the loop that drives it.

use std::net::SocketAddr;

use crate::net::ListeningSocket;
use crate::server::error::ConnectionError;

/// Where an iteration of the server loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    WaitConnection,
    Accepting,
    Handling,
    Responding,
}

impl Stage {
    /// The stage that follows this one. The cycle has no terminal state.
    pub fn next(self) -> Stage {
        match self {
            Stage::WaitConnection => Stage::Accepting,
            Stage::Accepting => Stage::Handling,
            Stage::Handling => Stage::Responding,
            Stage::Responding => Stage::WaitConnection,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::WaitConnection => "wait_connection",
            Stage::Accepting => "accepting",
            Stage::Handling => "handling",
            Stage::Responding => "responding",
        };
        f.write_str(name)
    }
}

/// Per-connection processing stages.
///
/// `accept` produces a connection, `handle` inspects it, and `respond`
/// consumes it. If `accept` fails the other two are skipped.
pub trait Pipeline {
    type Connection;

    fn accept(&mut self, listener: &ListeningSocket) -> Result<Self::Connection, ConnectionError>;

    fn handle(&mut self, connection: &mut Self::Connection);

    fn respond(&mut self, connection: Self::Connection) -> Result<(), ConnectionError>;
}

/// Serial server loop over one listening socket.
pub struct Server<P: Pipeline> {
    listener: ListeningSocket,
    pipeline: P,
    iteration: u64,
}

impl<P: Pipeline> Server<P> {
    pub fn new(listener: ListeningSocket, pipeline: P) -> Self {
        Self {
            listener,
            pipeline,
            iteration: 0,
        }
    }

    /// Run one full iteration: accept, handle, respond.
    pub fn serve_one(&mut self) -> Result<(), ConnectionError> {
        self.iteration += 1;
        let span = tracing::info_span!("connection", iteration = self.iteration);
        let _enter = span.enter();

        tracing::debug!(stage = %Stage::WaitConnection, "Waiting for new connection");

        let mut connection = self.pipeline.accept(&self.listener)?;

        tracing::trace!(stage = %Stage::Handling, "Stage entered");
        self.pipeline.handle(&mut connection);

        tracing::trace!(stage = %Stage::Responding, "Stage entered");
        self.pipeline.respond(connection)?;

        tracing::debug!("Connection handled");
        Ok(())
    }

    /// Serve connections until the process is terminated.
    pub fn run(mut self) -> ! {
        tracing::info!(address = ?self.listener.local_addr().ok(), "Server loop started");
        loop {
            if let Err(e) = self.serve_one() {
                match &e {
                    ConnectionError::Accept(_) | ConnectionError::Send(_) => {
                        tracing::warn!(stage = %e.stage(), error = %e, "Connection failed")
                    }
                    _ => tracing::info!(stage = %e.stage(), error = %e, "Connection dropped"),
                }
            }
        }
    }

    pub fn listener(&self) -> &ListeningSocket {
        &self.listener
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Number of iterations started so far.
    pub fn iterations(&self) -> u64 {
        self.iteration
    }
}
