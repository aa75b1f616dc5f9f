//! Shared utilities for integration tests.

use std::io::{Read, Write};
use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use simple_server::config::ServerConfig;
use simple_server::lifecycle;
use simple_server::server::{ConnectionError, Pipeline, Server};

/// Loopback config on an ephemeral port with a short receive timeout.
pub fn local_config(receive_timeout_secs: u64) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.interface = IpAddr::V4(Ipv4Addr::LOCALHOST);
    config.listener.port = 0;
    config.connection.receive_timeout_secs = receive_timeout_secs;
    config
}

/// Start the fixed-response server and serve exactly `iterations` connections
/// on a background thread. Returns the bound address and the per-iteration
/// outcomes.
pub fn spawn_fixed_server(
    config: &ServerConfig,
    iterations: usize,
) -> (SocketAddr, JoinHandle<Vec<Result<(), String>>>) {
    let server = lifecycle::start(config).expect("server setup failed");
    spawn_server(server, iterations)
}

/// Drive any pipeline for `iterations` connections on a background thread.
pub fn spawn_server<P>(
    mut server: Server<P>,
    iterations: usize,
) -> (SocketAddr, JoinHandle<Vec<Result<(), String>>>)
where
    P: Pipeline + Send + 'static,
{
    let addr = server.local_addr().expect("listener has no address");
    let handle = thread::spawn(move || {
        (0..iterations)
            .map(|_| server.serve_one().map_err(|e: ConnectionError| e.to_string()))
            .collect()
    });
    (addr, handle)
}

/// Send `payload` and read until the server closes the connection.
pub fn exchange(addr: SocketAddr, payload: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(10))).unwrap();
    stream.write_all(payload).unwrap();

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).unwrap();
    reply
}
