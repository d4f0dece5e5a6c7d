//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT (Ctrl-C) → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → accept loop stops after the in-flight connection → exit
//! ```
//!
//! # Design Decisions
//! - The cache is purged on startup, never on shutdown
//! - Shutdown never interrupts a connection mid-response

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
