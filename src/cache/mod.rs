//! Response cache subsystem.
//!
//! # Data Flow
//! ```text
//! Request locator ("host/path")
//!     → locator.rs (map segments onto a relative file path)
//!     → store.rs   (exists / read / write beneath the cache root)
//! ```
//!
//! # Design Decisions
//! - Only bodies are persisted: no headers, status or timestamps
//! - No eviction or expiry; the root is purged when the store is opened
//! - Single writer: the proxy handles one connection at a time, so no
//!   per-locator locking is needed

pub mod locator;
pub mod store;

pub use locator::Locator;
pub use store::CacheStore;
