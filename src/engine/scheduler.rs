// src/engine/scheduler.rs

//! Ordered, delay-spaced launching of commands.

use std::time::Duration;

use tracing::{debug, info};

use crate::exec::ExecutorBackend;
use crate::types::CommandList;

use super::barrier::CompletionBarrier;
use super::cancel::CancelToken;

/// Starts commands strictly in list order, sleeping `delay` after each one.
///
/// The scheduler keeps going after cancellation: later commands are still
/// handed to the backend on schedule, against the already-cancelled token.
pub struct LaunchScheduler<E: ExecutorBackend> {
    delay: Duration,
    executor: E,
}

impl<E: ExecutorBackend> LaunchScheduler<E> {
    pub fn new(delay: Duration, executor: E) -> Self {
        Self { delay, executor }
    }

    /// Launch every command and return how many were launched.
    ///
    /// Each launch is registered on `barrier` before it starts, so the
    /// barrier can never be observed empty while a launch is in progress.
    pub async fn run(
        &mut self,
        commands: CommandList,
        token: &CancelToken,
        barrier: &CompletionBarrier,
    ) -> usize {
        let total = commands.len();
        info!(total, delay = ?self.delay, "launching commands");

        let mut launched = 0;
        for spec in commands {
            let guard = barrier.register();
            debug!(
                index = launched,
                command = %spec,
                cancelled = token.is_cancelled(),
                "launching command"
            );
            self.executor.launch(spec, token.clone(), guard);
            launched += 1;

            tokio::time::sleep(self.delay).await;
        }

        debug!(launched, "all commands launched");
        launched
    }
}
