//! # Rover Scheduler
//!
//! Runs the mode scheduler loop with simulated mode bodies.
//!
//! ```bash
//! # Built-in defaults (stays in Initialize: nothing is scripted)
//! rover_scheduler
//!
//! # Scripted run
//! rover_scheduler --config config/scheduler.toml -v
//!
//! # Show the transition table and exit
//! rover_scheduler --print-table
//! ```

use clap::Parser;
use rover_common::config::LogLevel;
use rover_common::tick::MonotonicTicks;
use rover_scheduler::config::{RoverConfig, load_config};
use rover_scheduler::cycle::{Scheduler, detect_rt_mode, rt_setup};
use rover_scheduler::error::SchedulerError;
use rover_scheduler::sim::build_registry;
use rover_scheduler::transition::TRANSITIONS;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Rover Scheduler - fixed-period mode control loop
#[derive(Parser, Debug)]
#[command(name = "rover_scheduler")]
#[command(version)]
#[command(about = "Fixed-period mode scheduler for the rover control loop")]
struct Args {
    /// Path to scheduler TOML configuration. Built-in defaults when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// CPU core to pin the scheduler thread to (rt feature only).
    #[arg(long, default_value_t = 0)]
    cpu_core: usize,

    /// SCHED_FIFO priority (rt feature only).
    #[arg(long, default_value_t = 80)]
    rt_priority: i32,

    /// Enable verbose logging (DEBUG level), overrides `shared.log_level`.
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,

    /// Print the transition table and exit.
    #[arg(long)]
    print_table: bool,
}

fn main() {
    let args = Args::parse();

    if args.print_table {
        print_table();
        return;
    }

    // Config is read before tracing starts so `shared.log_level` applies.
    let loaded = match &args.config {
        Some(path) => load_config(path),
        None => Ok(RoverConfig::default()),
    };

    let level = match (&loaded, args.verbose) {
        (_, true) => LogLevel::Debug,
        (Ok(config), false) => config.shared.log_level,
        (Err(_), false) => LogLevel::Info,
    };
    setup_tracing(level, args.json);

    info!("Rover Scheduler v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = loaded
        .map_err(SchedulerError::from)
        .and_then(|config| run(&args, config));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(args: &Args, config: RoverConfig) -> Result<(), SchedulerError> {
    info!(
        service = %config.shared.service_name,
        period_ms = config.scheduler.loop_period_ms,
        scripted_modes = config.simulation.modes.len(),
        "config OK"
    );

    let registry = build_registry(&config.simulation)?;
    let mut scheduler = Scheduler::new(registry, MonotonicTicks::new(), &config.scheduler)?;

    rt_setup(args.cpu_core, args.rt_priority)?;
    if detect_rt_mode() {
        info!(cpu_core = args.cpu_core, priority = args.rt_priority, "running in real-time mode");
    } else {
        info!("running in standard (non-RT) mode");
    }

    scheduler.run()
}

fn print_table() {
    println!("{:<12} {:<24} {:<12}", "FROM", "OUTCOME", "TO");
    for t in TRANSITIONS {
        println!("{:<12} {:<24} {:<12}", t.from, t.outcome, t.to);
    }
}

/// Setup tracing subscriber. `RUST_LOG` directives take precedence.
fn setup_tracing(level: LogLevel, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
