//! Origin leg: connect, send the canonical request, read the response.
//!
//! # Responsibilities
//! - Open one short-lived connection per cache miss
//! - Apply the origin deadline to connect, write and every read
//! - Assemble the response head, then complete the body
//!
//! # Design Decisions
//! - Connections are hidden behind [`OriginConnector`] so the engine can be
//!   driven over in-memory streams
//! - A zero-length read ends the body loop even if the body is short
//! - No `Content-Length` means the body runs until the origin closes

use std::future::Future;
use std::io;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::http::response::find_head_end;
use crate::http::{ParseError, Request, Response};
use crate::resilience::timeouts::with_deadline;

/// Failure to obtain a usable response from an origin.
#[derive(Debug, Error)]
pub enum OriginError {
    #[error("Could not connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("Origin timed out: {0}")]
    Timeout(#[source] io::Error),

    #[error("Origin I/O error: {0}")]
    Io(#[source] io::Error),

    #[error("Malformed origin response: {0}")]
    MalformedResponse(#[from] ParseError),
}

impl From<io::Error> for OriginError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::TimedOut => OriginError::Timeout(e),
            _ => OriginError::Io(e),
        }
    }
}

/// Opens byte streams to origin servers.
pub trait OriginConnector {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    fn connect(&self, host: &str, port: u16) -> impl Future<Output = io::Result<Self::Stream>> + Send;
}

/// Plain TCP connections, resolving `host` through the system resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl OriginConnector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self, host: &str, port: u16) -> io::Result<TcpStream> {
        TcpStream::connect((host, port)).await
    }
}

/// Fetches responses from origins through a connector.
#[derive(Debug, Clone)]
pub struct OriginClient<C> {
    connector: C,
    buffer_size: usize,
    deadline: Duration,
}

impl<C: OriginConnector> OriginClient<C> {
    pub fn new(connector: C, buffer_size: usize, deadline: Duration) -> Self {
        Self {
            connector,
            buffer_size: buffer_size.max(1),
            deadline,
        }
    }

    /// Send `request` to `request.host():port` and read the full response.
    pub async fn fetch(&self, request: &Request, port: u16) -> Result<Response, OriginError> {
        let host = request.host();
        let mut stream = with_deadline(self.deadline, self.connector.connect(host, port))
            .await
            .map_err(|source| OriginError::Connect {
                host: host.to_string(),
                port,
                source,
            })?;
        tracing::debug!(host, port, "Connected to origin");

        with_deadline(self.deadline, stream.write_all(&request.to_bytes())).await?;

        let mut buf = vec![0u8; self.buffer_size];
        let mut head = Vec::new();
        loop {
            let n = self.read(&mut stream, &mut buf).await?;
            head.extend_from_slice(&buf[..n]);
            if n == 0 || find_head_end(&head).is_some() {
                break;
            }
        }

        let mut response = Response::parse(&head)?;
        while !matches!(response.body_remaining(), Some(0)) {
            let n = self.read(&mut stream, &mut buf).await?;
            if n == 0 {
                break;
            }
            response.extend_body(&buf[..n]);
        }

        tracing::debug!(
            status = response.status_code(),
            body_bytes = response.body().len(),
            complete = response.has_full_body(),
            "Origin response received"
        );
        Ok(response)
    }

    async fn read(&self, stream: &mut C::Stream, buf: &mut [u8]) -> io::Result<usize> {
        with_deadline(self.deadline, stream.read(buf)).await
    }
}
