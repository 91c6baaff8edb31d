//! Frame sink interface and reference log-line rendering
//!
//! The scheduler hands every frame to a [`FrameSink`] synchronously, one
//! call per frame, in generation order. Persistence lives behind this trait
//! so the library never touches the filesystem; the CLI provides the
//! file-backed implementation.

use crate::types::Frame;
use std::io;

/// Receives frames from the scheduler, one at a time, in cycle order
///
/// A returned error aborts the run; frames already accepted remain valid.
pub trait FrameSink {
    fn accept(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Render a frame in the reference log format:
///
/// ```text
/// YYYY-MM-DD HH:MM:SS.mmm CAN XXXXXXXX [8] <16 uppercase hex chars>\n
/// ```
///
/// The identifier is zero-padded to 8 uppercase hex digits; the payload is
/// the 8 data bytes as uppercase hex with no separators.
pub fn format_log_line(frame: &Frame) -> String {
    let payload: String = frame.data.iter().map(|byte| format!("{:02X}", byte)).collect();
    format!(
        "{} CAN {:08X} [8] {}\n",
        frame.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
        frame.can_id,
        payload
    )
}

/// Sink that collects frames in memory, mainly for tests and examples
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<Frame>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for MemorySink {
    fn accept(&mut self, frame: &Frame) -> io::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Local, TimeZone};

    #[test]
    fn test_log_line_format() {
        let timestamp = Local.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap()
            + ChronoDuration::milliseconds(123);
        let frame = Frame {
            can_id: 0x2003,
            data: [0x01, 0x00, 0x96, 0x00, 0xFF, 0xFF, 0x34, 0x12],
            timestamp,
        };

        assert_eq!(
            format_log_line(&frame),
            "2024-05-01 12:30:45.123 CAN 00002003 [8] 01009600FFFF3412\n"
        );
    }

    #[test]
    fn test_log_line_pads_identifier_to_8_digits() {
        let timestamp = Local.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let frame = Frame {
            can_id: 0x1FFF_FFFF,
            data: [0u8; 8],
            timestamp,
        };

        let line = format_log_line(&frame);
        assert!(line.contains(" CAN 1FFFFFFF [8] 0000000000000000\n"));

        let frame = Frame { can_id: 0x5, ..frame };
        assert!(format_log_line(&frame).contains(" CAN 00000005 "));
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let mut sink = MemorySink::new();
        for can_id in [0x2000, 0x2001, 0x2002] {
            let frame = Frame {
                can_id,
                data: [0u8; 8],
                timestamp: Local::now(),
            };
            sink.accept(&frame).unwrap();
        }

        let ids: Vec<u32> = sink.frames.iter().map(|f| f.can_id).collect();
        assert_eq!(ids, vec![0x2000, 0x2001, 0x2002]);
    }
}
