//! Caching forward proxy.
//!
//! Relays `GET` requests from clients to origin servers and keeps every
//! successful (200) response body in a cache directory, serving repeats
//! from disk.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                CACHING PROXY                 │
//!   Client Request    │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ──────────────────┼─▶│   net    │──▶│  http    │──▶│  cache   │  │
//!                     │  │ listener │   │ request  │   │  lookup  │  │
//!                     │  └──────────┘   └──────────┘   └────┬─────┘  │
//!                     │                                hit  │  miss  │
//!                     │                          ┌──────────┴──┐     │
//!                     │                          ▼             ▼     │
//!   Client Response   │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ◀─────────────────┼──│ Cache-Hit│◀──│ response │◀──│  origin  │◀─┼── Origin
//!                     │  │  stamp   │   │  build   │   │  fetch   │  │   Server
//!                     │  └──────────┘   └──────────┘   └──────────┘  │
//!                     └──────────────────────────────────────────────┘
//! ```
//!
//! Supports HTTP/1.1 and earlier, `GET` only, and relays status codes 200,
//! 404 and 500. Connections are never kept alive.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use caching_proxy::config::loader::load_config_with_port;
use caching_proxy::config::{ListenerConfig, ProxyConfig};
use caching_proxy::lifecycle::{signals, Shutdown};
use caching_proxy::observability::logging::init_logging;
use caching_proxy::ProxyServer;

#[derive(Parser)]
#[command(name = "caching-proxy")]
#[command(about = "Forward HTTP proxy that caches successful GET responses", long_about = None)]
struct Cli {
    /// Unreserved TCP port to listen on (10000-65535)
    #[arg(value_parser = clap::value_parser!(u16)
        .range(i64::from(ListenerConfig::MIN_PORT)..=i64::from(ListenerConfig::MAX_PORT)))]
    port: u16,

    /// TOML configuration file; PORT overrides its listener port
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config_with_port(path, cli.port) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Could not load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            let mut config = ProxyConfig::default();
            config.listener.port = cli.port;
            config
        }
    };

    init_logging(&config.observability);
    tracing::info!("caching-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let server = match ProxyServer::bind(config).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Could not execute the web proxy");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let stop = shutdown.subscribe();
    tokio::spawn(signals::trigger_on_interrupt(shutdown.clone()));

    server.run(stop).await;

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
