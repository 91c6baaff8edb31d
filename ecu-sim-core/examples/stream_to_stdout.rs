//! Standalone stream preview tool
//!
//! Runs the simulator for a few seconds and prints every frame to stdout in
//! the reference log format.
//!
//! Usage:
//!   cargo run --example stream_to_stdout [seconds] [frequency_hz]
//!
//! Example:
//!   cargo run --example stream_to_stdout 5 10

use ecu_sim_core::{format_log_line, Frame, FrameScheduler, FrameSink, SimulatorConfig};
use std::env;
use std::io::{self, Write};

struct StdoutSink {
    out: io::Stdout,
}

impl FrameSink for StdoutSink {
    fn accept(&mut self, frame: &Frame) -> io::Result<()> {
        self.out.write_all(format_log_line(frame).as_bytes())
    }
}

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let duration: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(2);
    let frequency: u32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    let config = SimulatorConfig::new()
        .with_duration(duration)
        .with_frequency(frequency);

    let mut scheduler = match FrameScheduler::new(config) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut sink = StdoutSink { out: io::stdout() };
    match scheduler.run(&mut sink) {
        Ok(summary) => {
            eprintln!(
                "\n{} frames in {} cycles over {:.2} s",
                summary.frames,
                summary.cycles,
                summary.elapsed.as_secs_f64()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
