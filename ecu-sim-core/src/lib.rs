//! ECU CAN Stream Simulator Library
//!
//! Emulates the periodic broadcast traffic of an engine-control-unit style
//! CAN bus node: at a fixed cadence it produces ten multi-signal frames per
//! cycle whose payloads follow an internal vehicle-state model (engine
//! speed, road speed, gear, temperatures, pressures) plus bounded noise.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on generation:
//! - A shared [`VehicleState`] couples the ten signal groups within and
//!   across cycles (road speed derives from engine speed, gear from road
//!   speed), so the groups run in a fixed order
//! - Every signal is clamped to its legal range, then encoded as a signed
//!   16-bit little-endian field
//! - The [`FrameScheduler`] holds the cycle rate constant and hands each
//!   frame to a [`FrameSink`] the moment its group has run
//!
//! The library does NOT:
//! - Open files or sockets (the sink trait is the only output path)
//! - Parse command lines or configuration files
//! - Print progress or summaries
//!
//! All of that is in the application layer (ecu-sim-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use ecu_sim_core::{FrameScheduler, MemorySink, SimulatorConfig};
//!
//! let config = SimulatorConfig::new().with_frequency(10).with_duration(1);
//! let mut scheduler = FrameScheduler::new(config).unwrap();
//!
//! let mut sink = MemorySink::new();
//! let summary = scheduler.run(&mut sink).unwrap();
//!
//! println!("{} frames in {} cycles", summary.frames, summary.cycles);
//! ```

// Public modules
pub mod codec;
pub mod config;
pub mod scheduler;
pub mod signals;
pub mod sink;
pub mod state;
pub mod types;

// Re-export main types for convenience
pub use config::SimulatorConfig;
pub use scheduler::{FrameScheduler, RunOutcome, RunSummary, SchedulerPhase, StopHandle};
pub use signals::SignalGroup;
pub use sink::{format_log_line, FrameSink, MemorySink};
pub use state::VehicleState;
pub use types::{Frame, Result, SimulatorError, Timestamp};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a default configuration produces a usable scheduler
        let scheduler = FrameScheduler::new(SimulatorConfig::new()).unwrap();
        assert_eq!(scheduler.phase(), SchedulerPhase::Idle);
        assert_eq!(SignalGroup::ALL.len(), 10);
    }
}
