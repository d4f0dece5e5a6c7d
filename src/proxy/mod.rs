//! Forward proxy subsystem.
//!
//! # Data Flow
//! ```text
//! server.rs  accept client
//!     → engine.rs  single read → parse → cache lookup
//!         hit  → 200 from stored body
//!         miss → origin.rs (connect, send, read head + body)
//!              → 200: cache body | 404/500: relay | other: 500
//!     → engine.rs  stamp Cache-Hit, write, close
//! ```

pub mod engine;
pub mod origin;
pub mod server;

pub use engine::{Resolution, ResolutionEngine};
pub use origin::{OriginClient, OriginConnector, OriginError, TcpConnector};
pub use server::{ProxyServer, StartupError};
