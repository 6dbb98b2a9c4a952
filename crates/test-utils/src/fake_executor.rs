use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use stagger::engine::{BarrierGuard, CancelToken};
use stagger::exec::ExecutorBackend;
use stagger::types::CommandSpec;

/// One recorded launch.
#[derive(Debug, Clone)]
pub struct Launch {
    pub spec: CommandSpec,
    pub at: Instant,
    pub cancelled_at_launch: bool,
}

/// What happened to a fake task once it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeOutcome {
    Completed(CommandSpec),
    Cancelled(CommandSpec),
}

/// A fake executor that:
/// - records every launch with its timestamp
/// - "runs" each command for `run_for`, finishing early on cancellation
/// - records how each command finished.
#[derive(Clone)]
pub struct FakeExecutor {
    run_for: Duration,
    launches: Arc<Mutex<Vec<Launch>>>,
    finished: Arc<Mutex<Vec<FakeOutcome>>>,
}

impl FakeExecutor {
    pub fn new(run_for: Duration) -> Self {
        Self {
            run_for,
            launches: Arc::new(Mutex::new(Vec::new())),
            finished: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn launches(&self) -> Vec<Launch> {
        self.launches.lock().unwrap().clone()
    }

    pub fn launched_commands(&self) -> Vec<String> {
        self.launches()
            .iter()
            .map(|l| l.spec.to_string())
            .collect()
    }

    pub fn finished(&self) -> Vec<FakeOutcome> {
        self.finished.lock().unwrap().clone()
    }
}

impl ExecutorBackend for FakeExecutor {
    fn launch(&mut self, spec: CommandSpec, token: CancelToken, guard: BarrierGuard) {
        {
            let mut launches = self.launches.lock().unwrap();
            launches.push(Launch {
                spec: spec.clone(),
                at: Instant::now(),
                cancelled_at_launch: token.is_cancelled(),
            });
        }

        let run_for = self.run_for;
        let finished = Arc::clone(&self.finished);

        tokio::spawn(async move {
            let outcome = if token.is_cancelled() {
                FakeOutcome::Cancelled(spec)
            } else {
                tokio::select! {
                    _ = tokio::time::sleep(run_for) => FakeOutcome::Completed(spec),
                    _ = token.cancelled() => FakeOutcome::Cancelled(spec),
                }
            };
            finished.lock().unwrap().push(outcome);
            drop(guard);
        });
    }
}
