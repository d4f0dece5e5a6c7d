//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind with backlog, accept)
//!     → connection.rs (id + tracing span)
//!     → Hand off to the resolution engine
//! ```
//!
//! # Design Decisions
//! - One connection is served to completion before the next accept
//! - No TLS: plain HTTP only

pub mod connection;
pub mod listener;
