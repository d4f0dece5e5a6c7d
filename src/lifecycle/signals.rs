//! OS signal handling.
//!
//! Ctrl-C (SIGINT) is the only supported way to stop the proxy.

use crate::lifecycle::Shutdown;

/// Wait for Ctrl-C and trigger `shutdown`.
pub async fn trigger_on_interrupt(shutdown: Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Interrupt received");
            shutdown.trigger();
        }
        Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
    }
}
