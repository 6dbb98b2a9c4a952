// src/engine/barrier.rs

//! Counting join barrier for launched tasks.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

/// Tracks how many launched tasks have not yet reached a terminal state.
///
/// - [`register`](Self::register) must be called before the task starts.
/// - The returned [`BarrierGuard`] marks the task done when dropped.
/// - [`wait`](Self::wait) consumes the barrier, so it can only return once.
#[derive(Debug)]
pub struct CompletionBarrier {
    outstanding: Arc<watch::Sender<usize>>,
}

impl CompletionBarrier {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0usize);
        Self {
            outstanding: Arc::new(tx),
        }
    }

    /// Add one outstanding task.
    pub fn register(&self) -> BarrierGuard {
        self.outstanding.send_modify(|n| *n += 1);
        BarrierGuard {
            outstanding: Arc::clone(&self.outstanding),
        }
    }

    pub fn outstanding(&self) -> usize {
        *self.outstanding.borrow()
    }

    /// Block until every registered task has signalled done.
    pub async fn wait(self) {
        let mut rx = self.outstanding.subscribe();
        debug!(outstanding = *rx.borrow(), "waiting for launched tasks");
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|n| *n == 0).await;
        debug!("all launched tasks finished");
    }
}

impl Default for CompletionBarrier {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof of one registration. Dropping it signals done exactly once.
#[derive(Debug)]
#[must_use = "dropping the guard immediately marks the task as done"]
pub struct BarrierGuard {
    outstanding: Arc<watch::Sender<usize>>,
}

impl Drop for BarrierGuard {
    fn drop(&mut self) {
        self.outstanding.send_modify(|n| {
            debug_assert!(*n > 0, "barrier count underflow");
            *n = n.saturating_sub(1);
        });
    }
}
