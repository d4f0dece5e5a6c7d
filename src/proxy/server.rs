//! Proxy server: accept loop around the resolution engine.
//!
//! # Responsibilities
//! - Bind the listener and open (purge) the cache at construction
//! - Accept one client at a time and serve it to completion
//! - Stop accepting when shutdown is signalled
//!
//! # Design Decisions
//! - Strictly sequential: a slow origin delays every queued client until
//!   its deadline expires
//! - A failed connection is logged and never stops the loop

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tracing::Instrument;

use crate::config::ProxyConfig;
use crate::net::connection::ClientConnection;
use crate::net::listener::{Listener, ListenerError};
use crate::proxy::engine::ResolutionEngine;

/// Failure while constructing the proxy.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Could not start listener: {0}")]
    Listener(#[from] ListenerError),

    #[error("Could not prepare cache directory: {0}")]
    Cache(#[from] std::io::Error),
}

/// The forward caching proxy.
pub struct ProxyServer {
    listener: Listener,
    engine: ResolutionEngine,
}

impl ProxyServer {
    /// Bind the listener, then purge and recreate the cache directory.
    pub async fn bind(config: ProxyConfig) -> Result<Self, StartupError> {
        let listener = Listener::bind(&config.listener).await?;
        let engine = ResolutionEngine::new(&config)?;

        tracing::info!(
            cache_dir = %config.cache.dir.display(),
            buffer_size = config.http.buffer_size,
            origin_timeout_ms = config.timeouts.origin_ms,
            "Proxy ready"
        );

        Ok(Self { listener, engine })
    }

    /// Get the local address the proxy listens on.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.listener.local_addr()
    }

    pub fn engine(&self) -> &ResolutionEngine {
        &self.engine
    }

    /// Serve clients until `shutdown` fires. A connection already being
    /// served is finished first.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        loop {
            tracing::debug!("Ready to serve");
            let accepted = tokio::select! {
                accepted = self.listener.accept() => accepted,
                _ = shutdown.recv() => {
                    tracing::info!("Shutting down...");
                    break;
                }
            };

            match accepted {
                Ok((stream, peer)) => self.handle(stream, peer).await,
                Err(e) => tracing::error!(error = %e, "Accept failed"),
            }
        }
    }

    async fn handle(&self, mut stream: TcpStream, peer: SocketAddr) {
        let client = ClientConnection::new(peer);
        async {
            tracing::info!("Received client connection");
            if let Err(e) = self.engine.serve(&mut stream).await {
                tracing::error!(error = %e, "Connection aborted");
            }
        }
        .instrument(client.span())
        .await
    }
}
