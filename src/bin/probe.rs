use std::io::{Read, Write};
use std::net::IpAddr;

use clap::Parser;
use socket2::Socket;

use simple_server::net::{AddressFamily, AssociatedSocket, SocketSpec, Transport};

#[derive(Parser)]
#[command(name = "probe")]
#[command(about = "Send one request to a server and print its reply", long_about = None)]
struct Cli {
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    #[arg(long, default_value = "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n")]
    payload: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let spec = SocketSpec {
        family: match cli.host {
            IpAddr::V4(_) => AddressFamily::Ipv4,
            IpAddr::V6(_) => AddressFamily::Ipv6,
        },
        transport: Transport::Stream,
        protocol: 0,
        interface: cli.host,
        port: cli.port,
        reuse_address: false,
    };

    let client = AssociatedSocket::connect(&spec)?;
    let socket: &Socket = client.handle().socket();

    let mut writer = socket;
    writer.write_all(cli.payload.as_bytes())?;

    let mut reply = Vec::new();
    let mut reader = socket;
    reader.read_to_end(&mut reply)?;

    println!("{}", String::from_utf8_lossy(&reply));
    Ok(())
}
