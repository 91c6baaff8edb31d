//! Fixed-frequency frame scheduler
//!
//! Drives the broadcast loop: each cycle evaluates the ten signal groups in
//! order against the shared vehicle state, hands every frame to the sink as
//! soon as its group has run, then sleeps off the remainder of the cycle
//! interval so the configured frequency holds regardless of per-cycle work.
//!
//! The whole loop runs on one thread. The vehicle state is owned by the
//! scheduler and only ever touched from the loop body, so no locking is
//! involved. Cancellation is cooperative: a stop request is observed at the
//! next cycle boundary, after the in-progress cycle has emitted all ten
//! frames.

use crate::config::SimulatorConfig;
use crate::signals::SignalGroup;
use crate::sink::FrameSink;
use crate::state::VehicleState;
use crate::types::{Frame, Result, SimulatorError};
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Scheduler lifecycle, advances one way only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    Idle,
    Running,
    Stopped,
}

/// Why a run ended; both variants are successful terminations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The configured duration elapsed
    DurationElapsed,
    /// An external stop was requested and honored at a cycle boundary
    StopRequested,
}

/// Counters reported after a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Completed cycles (each cycle emits ten frames)
    pub cycles: u64,
    /// Frames handed to the sink
    pub frames: u64,
    /// Wall-clock time from start to termination
    pub elapsed: Duration,
    pub outcome: RunOutcome,
}

/// Cloneable handle for requesting a cooperative stop
///
/// Safe to trigger from another thread or a signal handler; the scheduler
/// checks it once per cycle boundary.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Drives cycles at the configured frequency and feeds frames to a sink
pub struct FrameScheduler {
    config: SimulatorConfig,
    state: VehicleState,
    rng: StdRng,
    phase: SchedulerPhase,
    stop_flag: Arc<AtomicBool>,
}

impl FrameScheduler {
    /// Create a scheduler with a validated configuration and an
    /// entropy-seeded RNG
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a scheduler with a fixed RNG seed for reproducible runs
    pub fn with_seed(config: SimulatorConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulatorConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: VehicleState::new(),
            rng,
            phase: SchedulerPhase::Idle,
            stop_flag: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Handle for requesting a stop, e.g. from a Ctrl-C handler
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.stop_flag))
    }

    /// Run the broadcast loop until the duration elapses or a stop is
    /// requested
    ///
    /// Consumes the scheduler's Idle phase; a scheduler can run once. A sink
    /// failure aborts immediately and the error names the failing frame's
    /// identifier and cycle index.
    pub fn run(&mut self, sink: &mut dyn FrameSink) -> Result<RunSummary> {
        if self.phase != SchedulerPhase::Idle {
            return Err(SimulatorError::InvalidState(
                "scheduler has already run; create a new one for another run",
            ));
        }
        self.phase = SchedulerPhase::Running;

        let interval = self.config.cycle_interval();
        let started = Instant::now();
        let deadline = started + Duration::from_secs(self.config.duration_secs);

        log::info!(
            "Starting broadcast loop: {} Hz, {} s, identifiers 0x{:08X}..0x{:08X}",
            self.config.frequency_hz,
            self.config.duration_secs,
            self.config.base_can_id,
            self.config.base_can_id + SignalGroup::ALL.len() as u32 - 1
        );

        let mut cycles: u64 = 0;
        let mut frames: u64 = 0;

        let outcome = loop {
            if Instant::now() >= deadline {
                break RunOutcome::DurationElapsed;
            }
            if self.stop_flag.load(Ordering::Relaxed) {
                break RunOutcome::StopRequested;
            }

            let cycle_start = Instant::now();
            let elapsed = started.elapsed();

            for group in SignalGroup::ALL {
                let data = group.generate(&mut self.state, elapsed, &mut self.rng);
                let frame = Frame {
                    can_id: self.config.base_can_id + group.id_offset(),
                    data,
                    timestamp: Local::now(),
                };

                sink.accept(&frame).map_err(|source| SimulatorError::Sink {
                    can_id: frame.can_id,
                    cycle: cycles,
                    source,
                })?;
                frames += 1;
            }
            cycles += 1;

            thread::sleep(interval.saturating_sub(cycle_start.elapsed()));
        };

        self.phase = SchedulerPhase::Stopped;
        let summary = RunSummary {
            cycles,
            frames,
            elapsed: started.elapsed(),
            outcome,
        };
        log::info!(
            "Broadcast loop finished: {} cycles, {} frames, {:?}",
            summary.cycles,
            summary.frames,
            summary.outcome
        );
        Ok(summary)
    }
}
