//! Core types for the ECU stream simulator library
//!
//! This module defines the frame type emitted by the scheduler and the
//! library-wide error type. Frames are transient - the scheduler produces
//! them, hands them to the sink, and drops them. No frame history is kept.

use chrono::{DateTime, Local};

/// Timestamp type used throughout the simulator
///
/// Frames are stamped with local wall-clock time because the reference log
/// format renders local time.
pub type Timestamp = DateTime<Local>;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Largest valid 29-bit (extended) CAN identifier
pub const CAN_ID_29BIT_MAX: u32 = 0x1FFF_FFFF;

/// A single CAN frame produced by one signal group in one cycle
///
/// Every frame carries exactly 8 data bytes; the payload layout is four
/// signed 16-bit little-endian fields (one group zero-fills the trailing
/// six bytes).
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// 29-bit extended CAN identifier
    pub can_id: u32,
    /// Frame data bytes
    pub data: [u8; 8],
    /// Wall-clock instant the frame was generated
    pub timestamp: Timestamp,
}

impl Frame {
    /// Get the data length code (DLC) - always 8 for this node
    pub fn dlc(&self) -> usize {
        self.data.len()
    }
}

/// Errors that can occur while configuring or running the simulator
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Scheduler cannot start: {0}")]
    InvalidState(&'static str),

    #[error("Sink rejected frame 0x{can_id:08X} in cycle {cycle}: {source}")]
    Sink {
        can_id: u32,
        cycle: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dlc() {
        let frame = Frame {
            can_id: 0x2000,
            data: [0u8; 8],
            timestamp: Local::now(),
        };
        assert_eq!(frame.dlc(), 8);
    }

    #[test]
    fn test_sink_error_names_frame_and_cycle() {
        let err = SimulatorError::Sink {
            can_id: 0x2003,
            cycle: 17,
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"),
        };
        let message = err.to_string();
        assert!(message.contains("0x00002003"));
        assert!(message.contains("cycle 17"));
    }
}
