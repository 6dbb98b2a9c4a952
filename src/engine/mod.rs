// src/engine/mod.rs

//! Launch orchestration.
//!
//! This module ties together:
//! - the process-wide cancellation state ([`cancel`])
//! - the termination-signal listener that flips it ([`signals`])
//! - the counting barrier that waits for launched tasks ([`barrier`])
//! - the ordered, throttled launcher ([`scheduler`])

pub mod barrier;
pub mod cancel;
pub mod scheduler;
pub mod signals;

pub use barrier::{BarrierGuard, CompletionBarrier};
pub use cancel::{CancelToken, CancellationController};
pub use scheduler::LaunchScheduler;
pub use signals::{spawn_signal_listener, TerminationSignal};
