//! OS signal handling.
//!
//! Ctrl+C (SIGINT) is translated into the same stop used by the shutdown
//! route, without the grace delay.

use crate::lifecycle::ShutdownHandle;

/// Wait for Ctrl+C and stop the server.
pub async fn wait_for_ctrl_c(handle: ShutdownHandle) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Shutdown signal received");
            handle.trigger();
        }
        Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
    }
}
