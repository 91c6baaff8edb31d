//! Simulator configuration types
//!
//! The library takes a small, validated configuration: cycle frequency,
//! run duration, the identifier base for the ten broadcast slots, and the
//! (informational) bus bitrate. Where frames end up is the application
//! layer's concern - the library only talks to a sink.

use crate::types::{Result, SimulatorError, CAN_ID_29BIT_MAX};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of broadcast identifier slots, one per signal group
pub const GROUP_COUNT: u32 = 10;

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Bus bitrate in bits/s; informational only, recorded in the log header
    #[serde(default = "default_bitrate")]
    pub bitrate_bps: u32,

    /// Broadcast cycle frequency in Hz
    #[serde(default = "default_frequency")]
    pub frequency_hz: u32,

    /// Run duration in seconds
    #[serde(default = "default_duration")]
    pub duration_secs: u64,

    /// First of the ten consecutive 29-bit identifiers
    #[serde(default = "default_base_can_id")]
    pub base_can_id: u32,
}

fn default_bitrate() -> u32 {
    1_000_000
}

fn default_frequency() -> u32 {
    10
}

fn default_duration() -> u64 {
    30
}

fn default_base_can_id() -> u32 {
    0x2000
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            bitrate_bps: default_bitrate(),
            frequency_hz: default_frequency(),
            duration_secs: default_duration(),
            base_can_id: default_base_can_id(),
        }
    }
}

impl SimulatorConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the cycle frequency in Hz
    pub fn with_frequency(mut self, frequency_hz: u32) -> Self {
        self.frequency_hz = frequency_hz;
        self
    }

    /// Builder method: set the run duration in seconds
    pub fn with_duration(mut self, duration_secs: u64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// Builder method: set the bus bitrate
    pub fn with_bitrate(mut self, bitrate_bps: u32) -> Self {
        self.bitrate_bps = bitrate_bps;
        self
    }

    /// Builder method: set the identifier base
    pub fn with_base_can_id(mut self, base_can_id: u32) -> Self {
        self.base_can_id = base_can_id;
        self
    }

    /// Check the configuration before any frame is emitted
    pub fn validate(&self) -> Result<()> {
        if self.frequency_hz == 0 {
            return Err(SimulatorError::InvalidConfig(
                "frequency must be greater than zero".to_string(),
            ));
        }
        if self.duration_secs == 0 {
            return Err(SimulatorError::InvalidConfig(
                "duration must be greater than zero".to_string(),
            ));
        }
        if self.base_can_id > CAN_ID_29BIT_MAX - (GROUP_COUNT - 1) {
            return Err(SimulatorError::InvalidConfig(format!(
                "identifier base 0x{:08X} leaves no room for {} slots within 29 bits",
                self.base_can_id, GROUP_COUNT
            )));
        }
        Ok(())
    }

    /// Interval between cycle starts at the configured frequency
    pub fn cycle_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frequency_hz as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulatorConfig::new();
        assert_eq!(config.bitrate_bps, 1_000_000);
        assert_eq!(config.frequency_hz, 10);
        assert_eq!(config.duration_secs, 30);
        assert_eq!(config.base_can_id, 0x2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SimulatorConfig::new()
            .with_frequency(50)
            .with_duration(5)
            .with_bitrate(500_000)
            .with_base_can_id(0x1800);

        assert_eq!(config.frequency_hz, 50);
        assert_eq!(config.duration_secs, 5);
        assert_eq!(config.bitrate_bps, 500_000);
        assert_eq!(config.base_can_id, 0x1800);
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let config = SimulatorConfig::new().with_frequency(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let config = SimulatorConfig::new().with_duration(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_identifier_overflow_rejected() {
        let config = SimulatorConfig::new().with_base_can_id(CAN_ID_29BIT_MAX - 5);
        assert!(config.validate().is_err());

        let config = SimulatorConfig::new().with_base_can_id(CAN_ID_29BIT_MAX - 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cycle_interval() {
        let config = SimulatorConfig::new().with_frequency(10);
        assert_eq!(config.cycle_interval(), Duration::from_millis(100));

        let config = SimulatorConfig::new().with_frequency(100);
        assert_eq!(config.cycle_interval(), Duration::from_millis(10));
    }
}
