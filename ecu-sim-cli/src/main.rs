//! ECU CAN Stream Simulator CLI
//!
//! Command-line front end for the ecu-sim-core library. It adds:
//! - TOML configuration loading with command-line overrides
//! - The file-backed sink writing the reference text log format
//! - Ctrl-C wiring for a graceful stop at the next cycle boundary
//! - An end-of-run console summary

use anyhow::{Context, Result};
use clap::Parser;
use ecu_sim_core::{FrameScheduler, RunOutcome, RunSummary, SimulatorConfig};
use std::path::PathBuf;

mod config;
mod sink;

use sink::FileSink;

/// ECU CAN Stream Simulator - Generate ECU-style broadcast traffic logs
#[derive(Parser, Debug)]
#[command(name = "ecu-sim-cli")]
#[command(about = "Simulate ECU CAN bus broadcast traffic into a text log", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output log file (overrides config)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Cycle frequency in Hz (overrides config)
    #[arg(long, value_name = "HZ")]
    frequency: Option<u32>,

    /// Run duration in seconds (overrides config)
    #[arg(long, value_name = "SECONDS")]
    duration: Option<u64>,

    /// Bus bitrate in bits/s, informational (overrides config)
    #[arg(long, value_name = "BPS")]
    bitrate: Option<u32>,

    /// Identifier base, decimal or 0x-prefixed hex (overrides config)
    #[arg(long, value_name = "ID", value_parser = parse_can_id)]
    base_id: Option<u32>,

    /// RNG seed for a reproducible stream
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("ECU CAN Stream Simulator v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using simulator library v{}", ecu_sim_core::VERSION);

    // Load the config file (if any), then apply command-line overrides
    let app_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::AppConfig::default(),
    };

    let mut sim_config = app_config.simulator_config();
    if let Some(frequency) = args.frequency {
        sim_config = sim_config.with_frequency(frequency);
    }
    if let Some(duration) = args.duration {
        sim_config = sim_config.with_duration(duration);
    }
    if let Some(bitrate) = args.bitrate {
        sim_config = sim_config.with_bitrate(bitrate);
    }
    if let Some(base_id) = args.base_id {
        sim_config = sim_config.with_base_can_id(base_id);
    }

    let output_path = args
        .output
        .or(app_config.output.log_file)
        .unwrap_or_else(|| PathBuf::from("ecu_sim_log.txt"));

    run_simulation(sim_config, &output_path, args.seed, args.quiet)
}

/// Build the scheduler, wire Ctrl-C, run, and report
fn run_simulation(
    config: SimulatorConfig,
    output_path: &PathBuf,
    seed: Option<u64>,
    quiet: bool,
) -> Result<()> {
    let mut scheduler = match seed {
        Some(seed) => FrameScheduler::with_seed(config.clone(), seed)?,
        None => FrameScheduler::new(config.clone())?,
    };

    let stop_handle = scheduler.stop_handle();
    ctrlc::set_handler(move || {
        log::info!("Stop requested, finishing current cycle");
        stop_handle.request_stop();
    })
    .context("Failed to install Ctrl-C handler")?;

    let mut sink = FileSink::create(output_path, &config)
        .with_context(|| format!("Failed to create log file: {:?}", output_path))?;

    if !quiet {
        println!("═══════════════════════════════════════════════");
        println!("  ECU CAN Stream Simulator");
        println!("═══════════════════════════════════════════════\n");
        println!("Starting CAN stream simulation");
        println!("  Baud Rate:  {} bps", config.bitrate_bps);
        println!("  Frequency:  {} Hz", config.frequency_hz);
        println!("  Duration:   {} seconds", config.duration_secs);
        println!(
            "  Identifiers: 0x{:08X}..0x{:08X} (29-bit, 8-byte frames)",
            config.base_can_id,
            config.base_can_id + 9
        );
        println!("  Logging to: {:?}", output_path);
        println!("───────────────────────────────────────────────");
    }

    let summary = scheduler.run(&mut sink)?;

    if !quiet {
        print_summary(&summary);
    }

    Ok(())
}

/// End-of-run console report
fn print_summary(summary: &RunSummary) {
    let elapsed_secs = summary.elapsed.as_secs_f64();

    match summary.outcome {
        RunOutcome::DurationElapsed => println!("\nSimulation completed."),
        RunOutcome::StopRequested => println!("\nSimulation stopped by request."),
    }
    println!("Total frames: {}", summary.frames);
    println!("Total cycles: {}", summary.cycles);
    println!("Elapsed: {:.2} s", elapsed_secs);
    if elapsed_secs > 0.0 {
        println!(
            "Average frame rate: {:.2} frames/s",
            summary.frames as f64 / elapsed_secs
        );
        // Rough estimate: id + payload + overhead per logged frame
        println!(
            "Data rate: {:.2} kB/s",
            (summary.frames * 24) as f64 / elapsed_secs / 1000.0
        );
    }
}

/// Parse a CAN identifier, accepting decimal or 0x-prefixed hex
fn parse_can_id(s: &str) -> std::result::Result<u32, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|e| format!("invalid CAN identifier '{}': {}", s, e))
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
