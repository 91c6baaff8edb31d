//! File-backed frame sink
//!
//! Writes the reference text log: a `#`-prefixed header block describing
//! the stream, then one line per frame, flushed as soon as it is written.
//! A consumer tailing the file sees every frame the moment it is emitted.

use chrono::Local;
use ecu_sim_core::{format_log_line, Frame, FrameSink, SimulatorConfig};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Create the log file and write the header block
    pub fn create(path: &Path, config: &SimulatorConfig) -> io::Result<Self> {
        let mut file = File::create(path)?;

        writeln!(file, "# ECU CAN Bus Log")?;
        writeln!(
            file,
            "# Generated: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file, "# Baud Rate: {} bps", config.bitrate_bps)?;
        writeln!(file, "# Frequency: {} Hz", config.frequency_hz)?;
        writeln!(file, "# Identifiers: All 29-bit, Data: All 8 bytes")?;
        writeln!(file, "# Data Format: Signed 16-bit LSB first (little endian)")?;
        writeln!(file, "#{}", "-".repeat(60))?;
        file.flush()?;

        Ok(Self { file })
    }
}

impl FrameSink for FileSink {
    fn accept(&mut self, frame: &Frame) -> io::Result<()> {
        self.file.write_all(format_log_line(frame).as_bytes())?;
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_sink_writes_header_and_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream.txt");
        let config = SimulatorConfig::new();

        let mut sink = FileSink::create(&path, &config).unwrap();
        let frame = Frame {
            can_id: 0x2000,
            data: [0x20, 0x03, 0x32, 0x00, 0x55, 0x00, 0x19, 0x00],
            timestamp: Local::now(),
        };
        sink.accept(&frame).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "# ECU CAN Bus Log");
        assert!(lines[2].starts_with("# Baud Rate: 1000000 bps"));
        assert!(lines[3].starts_with("# Frequency: 10 Hz"));
        assert!(lines[6].starts_with("#---"));

        let frame_line = lines[7];
        assert!(frame_line.contains(" CAN 00002000 [8] 2003320055001900"));
    }

    #[test]
    fn test_create_fails_for_missing_directory() {
        let config = SimulatorConfig::new();
        let result = FileSink::create(Path::new("/no/such/dir/stream.txt"), &config);
        assert!(result.is_err());
    }
}
