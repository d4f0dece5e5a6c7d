//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → a `connection` span per client (id, peer)
//!
//! Consumers:
//!     → logging.rs (fmt subscriber on stdout)
//! ```
//!
//! # Design Decisions
//! - Logging has no behavioral effect on the proxy
//! - `RUST_LOG` overrides the configured level

pub mod logging;
