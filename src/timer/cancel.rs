//! Process-wide cancellation signal.
//!
//! A monotonic flag (false -> true, never reset) backed by a tokio watch
//! channel. Clones share the same flag, so the key handler, the render
//! driver, and every timer suspend point observe the same transition.

use std::sync::Arc;

use tokio::sync::watch;

/// Single-shot cancellation flag shared across tasks and threads.
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationSignal {
    /// Creates a signal in the not-cancelled state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Fires the signal.
    ///
    /// Returns `true` if this call performed the transition, `false` if the
    /// signal had already fired.
    pub fn cancel(&self) -> bool {
        let was_cancelled = self.tx.send_replace(true);
        if !was_cancelled {
            tracing::info!("cancellation requested");
        }
        !was_cancelled
    }

    /// Returns true once the signal has fired.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Completes once the signal has fired.
    ///
    /// Cancel-safe: a fresh future may be created on every `select!` pass.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so the channel cannot close here.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}
