//! HiveBox Service - HTTP entrypoint
//!
//! Serves the average air temperature of the configured region, computed
//! on every request from live openSenseMap data.
//!
//! Usage:
//!   cargo run --release                  # Serve on the configured port (default 8000)
//!   cargo run --release -- --port 9000   # Override the port
//!   cargo run --release -- --version     # Print the version and exit
//!
//! Environment:
//!   HIVEBOX_CONFIG - path to a TOML config file (default: ./hivebox.toml if present)
//!   RUST_LOG       - log filter (default: hivebox_service=info,warn)

use hivebox_service::config::ServiceConfig;
use hivebox_service::endpoint;
use hivebox_service::version::print_version;
use std::env;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hivebox_service=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

fn main() {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut port_override: Option<u16> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-V" => {
                print_version();
                return;
            }
            "--port" => {
                match args.get(i + 1).and_then(|p| p.parse().ok()) {
                    Some(port) => port_override = Some(port),
                    None => {
                        eprintln!("Error: --port requires a port number");
                        std::process::exit(1);
                    }
                }
                i += 2;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--port PORT] [--version]", args[0]);
                std::process::exit(1);
            }
        }
    }

    init_tracing();

    let mut config = match ServiceConfig::load_default() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };
    if let Some(port) = port_override {
        config.endpoint.port = port;
    }

    info!(
        version = hivebox_service::version::APP_VERSION,
        region = %config.region.name,
        bbox = %config.region.bbox.to_query_value(),
        upstream = %config.upstream.base_url,
        "starting HiveBox service"
    );

    if let Err(e) = endpoint::start_endpoint_server(config) {
        error!(error = %e, "endpoint server error");
        std::process::exit(1);
    }
}
