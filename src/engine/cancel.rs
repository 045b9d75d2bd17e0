//! Cooperative cancellation for asynchronous operations.
//!
//! Built on a `tokio::sync::watch` channel: a [`CancellationSource`] flips
//! the flag, every cloned [`CancellationToken`] observes it. Cancellation
//! aborts in-progress waits and in-flight requests promptly and surfaces a
//! distinct outcome, never a generic failure.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_access::engine::CancellationSource;
//!
//! let source = CancellationSource::new();
//! let token = source.token();
//! assert!(!token.is_cancelled());
//!
//! source.cancel();
//! assert!(token.is_cancelled());
//! ```

use thiserror::Error;
use tokio::sync::watch;

/// The distinct outcome of an aborted wait or call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("operation was cancelled")]
pub struct Cancelled;

/// Hands out [`CancellationToken`]s and fires them on demand.
#[derive(Debug)]
pub struct CancellationSource {
    tx: watch::Sender<bool>,
}

impl CancellationSource {
    /// Creates a new, un-fired source.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Returns a token observing this source.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            rx: self.tx.subscribe(),
        }
    }

    /// Fires cancellation. All outstanding tokens observe it.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Observes a [`CancellationSource`].
///
/// A token whose source has been dropped without firing never cancels;
/// [`CancellationToken::none`] builds such a token for call sites that do
/// not need cancellation.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    rx: watch::Receiver<bool>,
}

impl CancellationToken {
    /// Returns a token that never fires.
    #[must_use]
    pub fn none() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Whether cancellation has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation fires; pends forever on a token whose
    /// source was dropped without firing.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_token_observes_cancel() {
        let source = CancellationSource::new();
        let token = source.token();
        assert!(!token.is_cancelled());

        source.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_clones_share_the_signal() {
        let source = CancellationSource::new();
        let token = source.token();
        let clone = token.clone();

        source.cancel();
        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_resolves_after_fire() {
        let source = CancellationSource::new();
        let token = source.token();

        let waiter = tokio::spawn(async move { token.cancelled().await });
        source.cancel();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("cancelled() should resolve promptly")
            .expect("waiter task should not panic");
    }

    #[tokio::test]
    async fn test_none_token_never_fires() {
        let token = CancellationToken::none();
        assert!(!token.is_cancelled());

        let timed_out = tokio::time::timeout(Duration::from_millis(20), token.cancelled())
            .await
            .is_err();
        assert!(timed_out);
    }
}
