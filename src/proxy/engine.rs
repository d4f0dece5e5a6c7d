//! Per-connection resolution: parse → cache lookup → forward → respond.
//!
//! # Responsibilities
//! - Read one client message and parse it
//! - Serve cache hits without touching the origin
//! - Forward misses, cache 200 bodies, downgrade unknown statuses
//! - Stamp `Cache-Hit` and write the response back
//!
//! # Design Decisions
//! - Every request-level failure becomes a 500 with `Cache-Hit: 0`
//! - Cache filesystem errors are not translated; they abort the connection
//! - The client message is taken from a single read

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::cache::CacheStore;
use crate::config::ProxyConfig;
use crate::http::{status, ParseOptions, Request, Response, CACHE_HIT};
use crate::proxy::origin::{OriginClient, OriginConnector, TcpConnector};

/// Outcome of resolving one client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub response: Response,
    pub cache_hit: bool,
}

impl Resolution {
    fn hit(response: Response) -> Self {
        Self {
            response,
            cache_hit: true,
        }
    }

    fn miss(response: Response) -> Self {
        Self {
            response,
            cache_hit: false,
        }
    }
}

/// Drives a single client connection through the resolution state machine.
pub struct ResolutionEngine<C = TcpConnector> {
    cache: CacheStore,
    origin: OriginClient<C>,
    options: ParseOptions,
    buffer_size: usize,
}

impl ResolutionEngine<TcpConnector> {
    /// Create an engine that reaches origins over TCP. Purges the cache.
    pub fn new(config: &ProxyConfig) -> io::Result<Self> {
        Self::with_connector(config, TcpConnector)
    }
}

impl<C: OriginConnector> ResolutionEngine<C> {
    /// Create an engine over a custom connector. Purges the cache.
    pub fn with_connector(config: &ProxyConfig, connector: C) -> io::Result<Self> {
        let buffer_size = config.http.buffer_size.max(1);
        Ok(Self {
            cache: CacheStore::open(&config.cache)?,
            origin: OriginClient::new(connector, buffer_size, config.timeouts.origin()),
            options: config.http.parse_options(),
            buffer_size,
        })
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Receive one message from `stream`, resolve it, write the response
    /// and shut the stream down.
    pub async fn serve<S>(&self, stream: &mut S) -> io::Result<Resolution>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut buf = vec![0u8; self.buffer_size];
        let n = stream.read(&mut buf).await?;
        tracing::debug!(bytes = n, "Received client message");

        let mut resolution = self.resolve(&buf[..n]).await?;
        let flag = if resolution.cache_hit { "1" } else { "0" };
        resolution.response.set_header(CACHE_HIT, flag);

        stream.write_all(&resolution.response.to_bytes()).await?;
        stream.shutdown().await?;
        tracing::info!(
            status = resolution.response.status_code(),
            cache_hit = resolution.cache_hit,
            "Responded to client"
        );
        Ok(resolution)
    }

    /// Resolve a raw client message into a response, without `Cache-Hit`.
    pub async fn resolve(&self, raw: &[u8]) -> io::Result<Resolution> {
        let request = match Request::parse_with(raw, &self.options) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Rejecting client request");
                return Ok(Resolution::miss(Response::internal_error_with(self.options.max_version)));
            }
        };

        let locator = request.locator();
        if self.cache.exists(locator) {
            tracing::info!(%locator, "Cache hit");
            let body = self.cache.read(locator)?;
            return Ok(Resolution::hit(Response::ok_with(self.options.max_version, body)));
        }

        tracing::info!(%locator, "Cache miss, forwarding to origin");
        self.forward(&request).await.map(Resolution::miss)
    }

    async fn forward(&self, request: &Request) -> io::Result<Response> {
        let outbound = match Request::build_with(
            request.method(),
            request.host(),
            request.path(),
            &self.options,
        ) {
            Ok(outbound) => outbound,
            Err(e) => {
                tracing::warn!(error = %e, "Could not build origin request");
                return Ok(Response::internal_error_with(self.options.max_version));
            }
        };

        let response = match self.origin.fetch(&outbound, request.port()).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(host = request.host(), port = request.port(), error = %e, "Origin request failed");
                return Ok(Response::internal_error_with(self.options.max_version));
            }
        };

        match response.status_code() {
            status::OK => {
                self.cache.write(request.locator(), response.body())?;
                tracing::info!(locator = %request.locator(), "Cached origin response");
                Ok(response)
            }
            code if status::is_supported(code) => Ok(response),
            code => {
                tracing::warn!(status = code, "Unsupported origin status, answering 500");
                Ok(Response::internal_error_with(self.options.max_version))
            }
        }
    }
}
