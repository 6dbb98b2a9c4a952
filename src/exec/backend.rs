// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The scheduler talks to an `ExecutorBackend` instead of spawning processes
//! itself. This makes it easy to swap in a fake executor in tests while
//! keeping the production process runner in [`task_runner`](super::task_runner).

use tracing::debug;

use crate::engine::{BarrierGuard, CancelToken};
use crate::types::CommandSpec;

use super::task_runner::run_task;

/// Trait abstracting how a single command is launched.
pub trait ExecutorBackend: Send {
    /// Start running `spec` as an independent unit of work and return
    /// immediately.
    ///
    /// The implementation must keep `guard` alive until the command reaches a
    /// terminal state; dropping it is what releases the completion barrier.
    fn launch(&mut self, spec: CommandSpec, token: CancelToken, guard: BarrierGuard);
}

/// Real executor backend used in production: one tokio task per command.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealExecutorBackend;

impl RealExecutorBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutorBackend for RealExecutorBackend {
    fn launch(&mut self, spec: CommandSpec, token: CancelToken, guard: BarrierGuard) {
        tokio::spawn(async move {
            let outcome = run_task(&spec, &token).await;
            debug!(command = %spec, %outcome, "task runner finished");
            drop(guard);
        });
    }
}
