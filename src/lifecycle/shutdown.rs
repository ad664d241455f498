//! Shutdown coordination for the services.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that the server future subscribes to.
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
    /// Set once any handle has asked for shutdown.
    requested: Arc<AtomicBool>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        self.requested.store(true, Ordering::SeqCst);
        let _ = self.tx.send(());
    }

    /// Owned handle for request handlers, delaying the stop by `grace`.
    pub fn handle(&self, grace: Duration) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.tx.clone(),
            requested: Arc::clone(&self.requested),
            grace,
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable shutdown trigger carried in handler state.
///
/// The stop runs on its own task, so the handler that requested it returns
/// and its response is written before the listener is closed.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: broadcast::Sender<()>,
    requested: Arc<AtomicBool>,
    grace: Duration,
}

impl ShutdownHandle {
    /// Stop the server after the grace delay.
    ///
    /// Returns false if shutdown was already requested; only the first call
    /// schedules the stop.
    pub fn schedule(&self) -> bool {
        if self.requested.swap(true, Ordering::SeqCst) {
            return false;
        }

        let tx = self.tx.clone();
        let grace = self.grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            let _ = tx.send(());
        });
        true
    }

    /// Stop the server now (signal path).
    pub fn trigger(&self) {
        self.requested.store(true, Ordering::SeqCst);
        let _ = self.tx.send(());
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}
