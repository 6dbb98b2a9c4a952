// src/engine/cancel.rs

//! Process-wide cancellation.
//!
//! A [`CancellationController`] owns the only writer of a `watch` channel
//! holding a single `bool`. Every task receives a cloned [`CancelToken`]
//! (the read side) at spawn time. The value only ever moves from `false` to
//! `true`.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use super::signals::TerminationSignal;

/// Owner of the process-wide cancellation state.
///
/// Cloning the controller shares the same underlying state.
#[derive(Debug, Clone)]
pub struct CancellationController {
    tx: Arc<watch::Sender<bool>>,
}

impl CancellationController {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Obtain a read-only handle on the cancellation state.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }

    /// Cancel everything holding a token.
    ///
    /// Returns `true` only for the call that performed the transition; every
    /// later call is a no-op and returns `false`.
    pub fn cancel(&self) -> bool {
        let changed = self.tx.send_if_modified(|cancelled| {
            if *cancelled {
                false
            } else {
                *cancelled = true;
                true
            }
        });

        if changed {
            info!("cancelling");
        } else {
            debug!("cancellation already requested; ignoring");
        }
        changed
    }

    /// Same as [`cancel`](Self::cancel), recording which signal asked for it.
    pub fn cancel_with(&self, signal: TerminationSignal) -> bool {
        info!(signal = %signal, "termination signal received");
        self.cancel()
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for CancellationController {
    fn default() -> Self {
        Self::new()
    }
}

/// Read side of the cancellation state, handed to each task.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation has been requested.
    ///
    /// If the controller goes away without ever cancelling, this never
    /// resolves.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    #[test]
    fn starts_active() {
        let controller = CancellationController::new();
        assert!(!controller.is_cancelled());
        assert!(!controller.token().is_cancelled());
    }

    #[test]
    fn cancel_is_idempotent() {
        let controller = CancellationController::new();
        let token = controller.token();

        assert!(controller.cancel());
        assert!(!controller.cancel());
        assert!(!controller.cancel_with(TerminationSignal::Terminate));

        assert!(controller.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[test]
    fn tokens_taken_after_cancel_see_it() {
        let controller = CancellationController::new();
        controller.cancel();
        assert!(controller.token().is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_future_wakes_all_waiters() {
        let controller = CancellationController::new();
        let a = controller.token();
        let b = controller.token();

        let wa = tokio::spawn(async move { a.cancelled().await });
        let wb = tokio::spawn(async move { b.cancelled().await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.cancel();

        timeout(Duration::from_secs(1), wa).await.unwrap().unwrap();
        timeout(Duration::from_secs(1), wb).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn cancelled_future_is_ready_if_already_cancelled() {
        let controller = CancellationController::new();
        controller.cancel();
        let token = controller.token();
        timeout(Duration::from_millis(100), token.cancelled())
            .await
            .expect("should resolve immediately");
    }

    #[tokio::test]
    async fn cancelled_future_pends_when_controller_dropped() {
        let controller = CancellationController::new();
        let token = controller.token();
        drop(controller);

        let res = timeout(Duration::from_millis(50), token.cancelled()).await;
        assert!(res.is_err());
        assert!(!token.is_cancelled());
    }
}
