// src/engine/signals.rs

//! Termination-signal listener.
//!
//! Each interceptable signal gets its own long-lived tokio task that forwards
//! every delivery to [`CancellationController::cancel_with`]. The tasks are
//! detached and live until the process exits.

use std::fmt;

use tracing::{debug, warn};

use super::cancel::CancellationController;

/// Host termination requests that trigger cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
    Quit,
    HangUp,
    Kill,
    Stop,
}

impl TerminationSignal {
    /// Every signal the listener is asked to observe.
    pub const ALL: [TerminationSignal; 6] = [
        TerminationSignal::Interrupt,
        TerminationSignal::Kill,
        TerminationSignal::Terminate,
        TerminationSignal::Quit,
        TerminationSignal::HangUp,
        TerminationSignal::Stop,
    ];

    /// `SIGKILL` and `SIGSTOP` can never be caught by a process.
    pub fn is_interceptable(self) -> bool {
        !matches!(self, TerminationSignal::Kill | TerminationSignal::Stop)
    }

    pub fn name(self) -> &'static str {
        match self {
            TerminationSignal::Interrupt => "SIGINT",
            TerminationSignal::Terminate => "SIGTERM",
            TerminationSignal::Quit => "SIGQUIT",
            TerminationSignal::HangUp => "SIGHUP",
            TerminationSignal::Kill => "SIGKILL",
            TerminationSignal::Stop => "SIGSTOP",
        }
    }
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Start listening for termination signals.
///
/// Returns the signals that are actually being listened for. Uncatchable
/// signals are registered as no-ops; a registration failure is logged and
/// skipped rather than aborting the program.
pub fn spawn_signal_listener(controller: CancellationController) -> Vec<TerminationSignal> {
    let mut active = Vec::new();

    for signal in TerminationSignal::ALL {
        if !signal.is_interceptable() {
            debug!(signal = %signal, "signal cannot be intercepted; registration is inert");
            continue;
        }

        match listen(signal, controller.clone()) {
            Ok(true) => active.push(signal),
            Ok(false) => {
                debug!(signal = %signal, "signal not supported on this platform");
            }
            Err(e) => {
                warn!(signal = %signal, error = %e, "failed to register signal handler");
            }
        }
    }

    debug!(?active, "signal listener started");
    active
}

#[cfg(unix)]
fn listen(signal: TerminationSignal, controller: CancellationController) -> std::io::Result<bool> {
    use tokio::signal::unix::{signal as unix_signal, SignalKind};

    let kind = match signal {
        TerminationSignal::Interrupt => SignalKind::interrupt(),
        TerminationSignal::Terminate => SignalKind::terminate(),
        TerminationSignal::Quit => SignalKind::quit(),
        TerminationSignal::HangUp => SignalKind::hangup(),
        TerminationSignal::Kill | TerminationSignal::Stop => return Ok(false),
    };

    let mut stream = unix_signal(kind)?;
    tokio::spawn(async move {
        while stream.recv().await.is_some() {
            controller.cancel_with(signal);
        }
    });
    Ok(true)
}

#[cfg(not(unix))]
fn listen(signal: TerminationSignal, controller: CancellationController) -> std::io::Result<bool> {
    if signal != TerminationSignal::Interrupt {
        return Ok(false);
    }

    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                return;
            }
            controller.cancel_with(signal);
        }
    });
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kill_and_stop_are_not_interceptable() {
        let inert: Vec<_> = TerminationSignal::ALL
            .into_iter()
            .filter(|s| !s.is_interceptable())
            .collect();
        assert_eq!(inert, vec![TerminationSignal::Kill, TerminationSignal::Stop]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn listener_skips_uncatchable_signals() {
        let controller = CancellationController::new();
        let active = spawn_signal_listener(controller.clone());

        assert!(active.contains(&TerminationSignal::Interrupt));
        assert!(active.contains(&TerminationSignal::Terminate));
        assert!(active.contains(&TerminationSignal::Quit));
        assert!(active.contains(&TerminationSignal::HangUp));
        assert!(!active.contains(&TerminationSignal::Kill));
        assert!(!active.contains(&TerminationSignal::Stop));
        assert!(!controller.is_cancelled());
    }
}
