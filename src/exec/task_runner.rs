// src/exec/task_runner.rs

//! Individual command process runner.

use std::fmt;
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tracing::{debug, error, info, warn};

use crate::engine::CancelToken;
use crate::types::CommandSpec;

/// Terminal state of a single launched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    /// Process exited with a non-zero code.
    Failed(i32),
    /// Process was terminated by a signal it did not get from us.
    Signalled(i32),
    /// The process could not be started at all.
    SpawnFailed(String),
    /// Cancellation fired before or while the process ran.
    Cancelled,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success)
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskOutcome::Success => f.write_str("success"),
            TaskOutcome::Failed(code) => write!(f, "exit status {code}"),
            TaskOutcome::Signalled(sig) => write!(f, "signal: {sig}"),
            TaskOutcome::SpawnFailed(msg) => write!(f, "failed to start: {msg}"),
            TaskOutcome::Cancelled => f.write_str("killed: cancelled"),
        }
    }
}

/// Run one command to completion with stdout/stderr passed straight through.
///
/// Failures are logged here and returned as a [`TaskOutcome`]; they never
/// surface as errors to the caller.
pub async fn run_task(spec: &CommandSpec, token: &CancelToken) -> TaskOutcome {
    info!(command = %spec, "executing");

    let outcome = run_task_inner(spec, token).await;

    if outcome.is_success() {
        debug!(command = %spec, "command finished");
    } else {
        error!(command = %spec, error = %outcome, "command failed");
    }
    outcome
}

async fn run_task_inner(spec: &CommandSpec, token: &CancelToken) -> TaskOutcome {
    // A start against an already-cancelled token never spawns anything.
    if token.is_cancelled() {
        return TaskOutcome::Cancelled;
    }

    let mut cmd = Command::new(spec.program());
    cmd.args(spec.args())
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => return TaskOutcome::SpawnFailed(e.to_string()),
    };

    debug!(command = %spec, pid = ?child.id(), "process started");

    wait_or_cancel(spec, &mut child, token).await
}

/// Wait for `child`, killing it if cancellation fires first.
///
/// An exit that is already observable wins over a simultaneous cancellation.
async fn wait_or_cancel(spec: &CommandSpec, child: &mut Child, token: &CancelToken) -> TaskOutcome {
    tokio::select! {
        biased;

        status_res = child.wait() => {
            match status_res {
                Ok(status) => outcome_from_status(status),
                Err(e) => {
                    warn!(command = %spec, error = %e, "failed waiting for process");
                    TaskOutcome::Failed(-1)
                }
            }
        }

        _ = token.cancelled() => {
            if let Ok(Some(status)) = child.try_wait() {
                return outcome_from_status(status);
            }
            info!(command = %spec, "cancellation requested; killing process");
            if let Err(e) = child.kill().await {
                warn!(command = %spec, error = %e, "failed to kill process on cancellation");
            }
            TaskOutcome::Cancelled
        }
    }
}

fn outcome_from_status(status: ExitStatus) -> TaskOutcome {
    if status.success() {
        return TaskOutcome::Success;
    }
    if let Some(code) = status.code() {
        return TaskOutcome::Failed(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return TaskOutcome::Signalled(sig);
        }
    }

    TaskOutcome::Failed(-1)
}
