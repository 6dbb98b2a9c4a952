// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`task_runner`] runs one command with `tokio::process::Command`, passes
//!   its output through and reacts to cancellation.
//! - [`backend`] provides the `ExecutorBackend` trait and the concrete
//!   `RealExecutorBackend` used by the scheduler in production, which tests
//!   can replace with a fake implementation.

pub mod backend;
pub mod task_runner;

pub use backend::{ExecutorBackend, RealExecutorBackend};
pub use task_runner::{run_task, TaskOutcome};
