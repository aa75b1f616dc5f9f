//! Fail-fast exit of the `simple-server` binary.

use std::net::TcpListener;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Run the server binary with `args`; kill it if it is still serving after
/// ten seconds.
fn run_server(args: &[&str]) -> ExitStatus {
    let mut child = Command::new(env!("CARGO_BIN_EXE_simple-server"))
        .args(args)
        .args(["--log-level", "error"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to launch simple-server");

    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            panic!("simple-server entered its loop instead of exiting");
        }
        thread::sleep(Duration::from_millis(50));
    }
}

#[test]
fn test_taken_port_exits_with_failure() {
    let taken = TcpListener::bind("0.0.0.0:0").unwrap();
    let port = taken.local_addr().unwrap().port().to_string();

    let status = run_server(&["--port", &port]);
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_invalid_backlog_exits_with_failure() {
    let status = run_server(&["--port", "0", "--backlog", "0"]);
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_missing_config_file_exits_with_failure() {
    let status = run_server(&["--config", "/nonexistent/simple-server.toml"]);
    assert_eq!(status.code(), Some(1));
}
