//! HTTP message model.
//!
//! # Data Flow
//! ```text
//! client bytes  → request.rs  (parse, validate, derive locator)
//!               → request.rs  (build canonical outbound request)
//! origin bytes  → response.rs (parse head, complete body)
//!               → response.rs (stamp Cache-Hit, serialize to client)
//! ```
//!
//! # Design Decisions
//! - Parsing returns `Result<_, ParseError>`; callers match on the error
//! - Builders always produce messages that re-parse to themselves
//! - Header keys are case-sensitive as received

pub mod error;
pub mod headers;
pub mod request;
pub mod response;
pub mod status;
pub mod version;

pub use error::ParseError;
pub use headers::Headers;
pub use request::{Method, ParseOptions, Request};
pub use response::Response;
pub use version::HttpVersion;

/// Line terminator for every message line.
pub const CRLF: &str = "\r\n";

pub const CONTENT_LENGTH: &str = "Content-Length";

/// Synthesized header telling the client whether the body came from the cache.
pub const CACHE_HIT: &str = "Cache-Hit";
