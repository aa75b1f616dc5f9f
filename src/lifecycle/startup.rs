//! Startup orchestration.

use crate::config::ServerConfig;
use crate::net::{ListeningSocket, SetupError};
use crate::server::{FixedResponsePipeline, Server};

/// Build the listening socket chain and the fixed-response server.
///
/// Returns before any connection is accepted; the caller drives the loop.
pub fn start(config: &ServerConfig) -> Result<Server<FixedResponsePipeline>, SetupError> {
    let spec = config.listener.socket_spec();
    let listener = ListeningSocket::open(&spec, config.listener.backlog)?;

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(address = %addr, "Listening for connections");
    }

    let pipeline = FixedResponsePipeline::from_config(&config.connection);
    tracing::debug!(
        buffer_capacity = pipeline.capacity(),
        receive_timeout_secs = config.connection.receive_timeout_secs,
        "Pipeline ready"
    );

    Ok(Server::new(listener, pipeline))
}
