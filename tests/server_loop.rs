//! End-to-end tests for the serial server loop.

use std::io::{Read, Write};
use std::net::{Ipv4Addr, Shutdown, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use simple_server::lifecycle;
use simple_server::net::{Connection, ListeningSocket, SetupError, SocketSpec};
use simple_server::server::{ConnectionError, Pipeline, Server, FIXED_RESPONSE};

mod common;

#[test]
fn test_fixed_response_regardless_of_payload() {
    let config = common::local_config(5);
    let (addr, server) = common::spawn_fixed_server(&config, 3);

    let payloads: [&[u8]; 3] = [
        b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n",
        b"POST /anything HTTP/1.0\r\n\r\nbody",
        b"\x00\x01\x02 not http at all",
    ];
    for payload in payloads {
        assert_eq!(common::exchange(addr, payload), FIXED_RESPONSE);
    }

    let outcomes = server.join().unwrap();
    assert!(outcomes.iter().all(Result::is_ok), "{outcomes:?}");
}

#[test]
fn test_connection_ends_after_response() {
    let config = common::local_config(5);
    let (addr, server) = common::spawn_fixed_server(&config, 1);

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(10))).unwrap();
    stream.write_all(b"hello").unwrap();

    let mut reply = vec![0u8; FIXED_RESPONSE.len()];
    stream.read_exact(&mut reply).unwrap();
    assert_eq!(reply, FIXED_RESPONSE);

    let mut rest = [0u8; 16];
    assert_eq!(stream.read(&mut rest).unwrap(), 0);

    server.join().unwrap();
}

#[test]
fn test_peer_closing_without_data_is_skipped() {
    let config = common::local_config(5);
    let (addr, server) = common::spawn_fixed_server(&config, 2);

    let silent = TcpStream::connect(addr).unwrap();
    silent.shutdown(Shutdown::Write).unwrap();

    assert_eq!(common::exchange(addr, b"next"), FIXED_RESPONSE);

    let outcomes = server.join().unwrap();
    assert_eq!(outcomes[0], Err(ConnectionError::PeerClosed.to_string()));
    assert!(outcomes[1].is_ok());
    drop(silent);
}

#[test]
fn test_silent_client_times_out_and_loop_continues() {
    let config = common::local_config(1);
    let (addr, server) = common::spawn_fixed_server(&config, 2);

    let mut silent = TcpStream::connect(addr).unwrap();
    silent.set_read_timeout(Some(Duration::from_secs(10))).unwrap();

    // Queued behind the silent client until its receive timeout expires.
    assert_eq!(common::exchange(addr, b"after timeout"), FIXED_RESPONSE);

    let mut rest = Vec::new();
    let _ = silent.read_to_end(&mut rest);
    assert!(rest.is_empty());

    let outcomes = server.join().unwrap();
    assert_eq!(outcomes[0], Err(ConnectionError::ReceiveTimeout.to_string()));
    assert!(outcomes[1].is_ok());
}

#[test]
fn test_setup_failure_before_loop() {
    let taken = TcpListener::bind("127.0.0.1:0").unwrap();
    let mut config = common::local_config(5);
    config.listener.port = taken.local_addr().unwrap().port();

    match lifecycle::start(&config) {
        Ok(_) => panic!("server started on a port already in use"),
        Err(e) => assert!(matches!(e, SetupError::Bind { .. })),
    }
}

/// Pipeline that records every stage it enters.
struct RecordingPipeline {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingPipeline {
    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl Pipeline for RecordingPipeline {
    type Connection = (Connection, Vec<u8>);

    fn accept(&mut self, listener: &ListeningSocket) -> Result<Self::Connection, ConnectionError> {
        let mut connection = listener.accept().map_err(ConnectionError::Accept)?;
        let mut buf = [0u8; 64];
        let n = connection
            .receive(&mut buf)
            .map_err(ConnectionError::from_receive)?;
        let name = buf[..n].to_vec();
        self.record(format!("accept {}", String::from_utf8_lossy(&name)));
        Ok((connection, name))
    }

    fn handle(&mut self, connection: &mut Self::Connection) {
        self.record(format!("handle {}", String::from_utf8_lossy(&connection.1)));
    }

    fn respond(&mut self, connection: Self::Connection) -> Result<(), ConnectionError> {
        let (mut connection, name) = connection;
        connection.send_all(b"ok").map_err(ConnectionError::Send)?;
        connection.close();
        self.record(format!("respond {}", String::from_utf8_lossy(&name)));
        Ok(())
    }
}

#[test]
fn test_connections_are_strictly_sequential() {
    let listener = ListeningSocket::open(&SocketSpec::tcp_v4(Ipv4Addr::LOCALHOST, 0), 10).unwrap();
    let events = Arc::new(Mutex::new(Vec::new()));
    let server = Server::new(
        listener,
        RecordingPipeline {
            events: Arc::clone(&events),
        },
    );
    let (addr, handle) = common::spawn_server(server, 2);

    // Both clients are queued in the backlog before the loop reaches them.
    let mut a = TcpStream::connect(addr).unwrap();
    let mut b = TcpStream::connect(addr).unwrap();
    a.write_all(b"A").unwrap();
    b.write_all(b"B").unwrap();

    let mut reply = Vec::new();
    a.read_to_end(&mut reply).unwrap();
    assert_eq!(reply, b"ok");
    reply.clear();
    b.read_to_end(&mut reply).unwrap();
    assert_eq!(reply, b"ok");

    handle.join().unwrap();
    assert_eq!(
        *events.lock().unwrap(),
        vec!["accept A", "handle A", "respond A", "accept B", "handle B", "respond B"]
    );
}
