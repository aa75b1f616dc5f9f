use std::path::PathBuf;

use clap::Parser;

use simple_server::config::{self, ServerConfig};
use simple_server::lifecycle;
use simple_server::observability::logging;

#[derive(Parser)]
#[command(name = "simple-server")]
#[command(about = "Serial TCP server answering every connection with a fixed response", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override listener.backlog.
    #[arg(short, long)]
    backlog: Option<i32>,

    /// Override observability.log_level.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn load(&self) -> Result<ServerConfig, config::ConfigError> {
        let mut config = match &self.config {
            Some(path) => config::load_config(path)?,
            None => ServerConfig::default(),
        };

        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(backlog) = self.backlog {
            config.listener.backlog = backlog;
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }

        config::validate_config(&config).map_err(config::ConfigError::Validation)?;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("simple-server: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&config.observability) {
        eprintln!("simple-server: logging disabled: {e}");
    }

    tracing::info!("simple-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        interface = %config.listener.interface,
        port = config.listener.port,
        backlog = config.listener.backlog,
        receive_timeout_secs = config.connection.receive_timeout_secs,
        "Configuration loaded"
    );

    // Setup failures are fatal; nothing is retried.
    let server = match lifecycle::start(&config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            std::process::exit(1);
        }
    };

    server.run()
}
