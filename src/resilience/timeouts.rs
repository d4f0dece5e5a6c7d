//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap origin calls (connect, write, read) with a deadline
//! - Report expiry as `io::ErrorKind::TimedOut`
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - Only the origin leg has deadlines; client reads block indefinitely

use std::future::Future;
use std::io;
use std::time::Duration;

/// Run `operation`, failing with `TimedOut` if it does not finish within `deadline`.
pub async fn with_deadline<F, T>(deadline: Duration, operation: F) -> io::Result<T>
where
    F: Future<Output = io::Result<T>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("operation timed out after {:?}", deadline),
        )),
    }
}
