//! Per-connection identity for tracing.
//!
//! Every accepted client gets a sequential id, and all log lines emitted
//! while it is served carry that id and the peer address.

use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Relaxed ordering is enough: ids only need to be unique.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn next() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// An accepted client connection, as seen by the logs.
#[derive(Debug, Clone, Copy)]
pub struct ClientConnection {
    pub id: ConnectionId,
    pub peer: SocketAddr,
}

impl ClientConnection {
    pub fn new(peer: SocketAddr) -> Self {
        Self {
            id: ConnectionId::next(),
            peer,
        }
    }

    /// Span wrapping everything done on behalf of this client.
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!("connection", id = %self.id, peer = %self.peer)
    }
}
