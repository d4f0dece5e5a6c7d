//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to origin:
//!     → timeouts.rs (enforce connect/write/read deadline)
//!     → On failure: caller answers the client with a 500
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every origin call has a deadline
//! - No retries: a failed origin fetch is reported, never repeated

pub mod timeouts;
