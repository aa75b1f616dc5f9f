//! Fixed-response pipeline.
//!
//! Reads one request per connection into a reused buffer, logs it, and always
//! answers with the same HTTP-shaped bytes.

use std::fmt::Write as _;
use std::time::Duration;

use crate::config::ConnectionConfig;
use crate::net::{Connection, ListeningSocket};
use crate::server::error::ConnectionError;
use crate::server::pipeline::Pipeline;

/// Response written to every connection, whatever it sent.
pub const FIXED_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\n\
Content-Type: text/plain\r\n\
Connection: close\r\n\
Content-Length: 19\r\n\
\r\n\
Hello from Server!\r\n";

const HEX_DUMP_LIMIT: usize = 50;

/// Pipeline answering every request with `FIXED_RESPONSE`.
#[derive(Debug)]
pub struct FixedResponsePipeline {
    buffer: Vec<u8>,
    received: usize,
    receive_timeout: Duration,
}

impl FixedResponsePipeline {
    pub fn new(buffer_capacity: usize, receive_timeout: Duration) -> Self {
        Self {
            buffer: vec![0; buffer_capacity],
            received: 0,
            receive_timeout,
        }
    }

    pub fn from_config(config: &ConnectionConfig) -> Self {
        Self::new(config.buffer_capacity, config.receive_timeout())
    }

    /// Bytes read from the current connection.
    pub fn received(&self) -> &[u8] {
        &self.buffer[..self.received]
    }

    /// The whole receive buffer, including the unused tail.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn receive_timeout(&self) -> Duration {
        self.receive_timeout
    }

    fn reset_buffer(&mut self) {
        self.buffer.fill(0);
        self.received = 0;
    }
}

impl Default for FixedResponsePipeline {
    fn default() -> Self {
        Self::from_config(&ConnectionConfig::default())
    }
}

impl Pipeline for FixedResponsePipeline {
    type Connection = Connection;

    fn accept(&mut self, listener: &ListeningSocket) -> Result<Connection, ConnectionError> {
        tracing::debug!("Attempting to accept connection");
        let mut connection = listener.accept().map_err(ConnectionError::Accept)?;

        tracing::info!(
            connection_id = %connection.id(),
            peer_addr = ?connection.peer_addr(),
            "Connection accepted"
        );

        self.reset_buffer();

        connection
            .set_receive_timeout(self.receive_timeout)
            .map_err(ConnectionError::Receive)?;

        let bytes_read = connection
            .receive(&mut self.buffer)
            .map_err(ConnectionError::from_receive)?;

        if bytes_read == 0 {
            return Err(ConnectionError::PeerClosed);
        }
        self.received = bytes_read;

        tracing::debug!(
            connection_id = %connection.id(),
            bytes = bytes_read,
            hex = %hex_prefix(self.received(), HEX_DUMP_LIMIT),
            "Request read"
        );

        Ok(connection)
    }

    /// Logs the request. `accept` never yields an empty read, so the empty
    /// branch only runs for connections accepted outside this pipeline.
    fn handle(&mut self, connection: &mut Connection) {
        let request = self.received();
        if request.is_empty() {
            tracing::info!(connection_id = %connection.id(), "Empty request received");
            return;
        }

        tracing::info!(
            connection_id = %connection.id(),
            bytes = request.len(),
            "Received request\n--- Begin Request ---\n{}\n--- End Request ---",
            String::from_utf8_lossy(request)
        );
    }

    fn respond(&mut self, mut connection: Connection) -> Result<(), ConnectionError> {
        let sent = connection.send_all(FIXED_RESPONSE);
        let id = connection.id();
        connection.close();

        sent.map_err(ConnectionError::Send)?;
        tracing::info!(connection_id = %id, bytes = FIXED_RESPONSE.len(), "Response sent");
        Ok(())
    }
}

/// Space-separated hex of at most `limit` leading bytes.
fn hex_prefix(bytes: &[u8], limit: usize) -> String {
    let mut out = String::with_capacity(limit.min(bytes.len()) * 3);
    for (i, b) in bytes.iter().take(limit).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:02x}", b);
    }
    out
}
