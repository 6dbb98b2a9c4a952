// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::engine::{
    spawn_signal_listener, CancellationController, CompletionBarrier, LaunchScheduler,
};
use crate::errors::Result;
use crate::exec::{ExecutorBackend, RealExecutorBackend};
use crate::types::CommandList;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - command list loading (fatal on any error, before anything launches)
/// - the cancellation controller and its signal listener
/// - the launch scheduler
/// - the completion barrier
pub async fn run(args: CliArgs) -> Result<()> {
    let commands = config::load_from_path(&args.json)?;

    if args.dry_run {
        print_dry_run(&commands, &args);
        return Ok(());
    }

    let controller = CancellationController::new();
    spawn_signal_listener(controller.clone());

    let launched = run_commands(commands, args.delay, &controller, RealExecutorBackend::new()).await;
    info!(launched, "all commands finished");
    Ok(())
}

/// Launch `commands` through `executor` and wait for all of them to finish.
///
/// Returns the number of launches. Individual command failures never turn
/// into an error here.
pub async fn run_commands<E: ExecutorBackend>(
    commands: CommandList,
    delay: std::time::Duration,
    controller: &CancellationController,
    executor: E,
) -> usize {
    let token = controller.token();
    let barrier = CompletionBarrier::new();

    let mut scheduler = LaunchScheduler::new(delay, executor);
    let launched = scheduler.run(commands, &token, &barrier).await;

    barrier.wait().await;
    launched
}

/// Simple dry-run output: print the delay and each command.
fn print_dry_run(commands: &CommandList, args: &CliArgs) {
    println!("stagger dry-run");
    println!("  source = {}", args.json);
    println!("  delay = {:?}", args.delay);
    println!();

    println!("commands ({}):", commands.len());
    for (idx, spec) in commands.iter().enumerate() {
        println!("  {:>3}. {}", idx + 1, spec);
    }

    debug!("dry-run complete (no execution)");
}
