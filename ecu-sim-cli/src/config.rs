//! Configuration loading and parsing
//!
//! The CLI accepts an optional TOML file mirroring the library
//! configuration, plus an output target. Command-line flags override
//! whatever the file sets.

use anyhow::{Context, Result};
use ecu_sim_core::SimulatorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub bus: BusConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BusConfig {
    pub bitrate: u32,
    pub frequency: u32,
    pub base_can_id: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        let core = SimulatorConfig::default();
        Self {
            bitrate: core.bitrate_bps,
            frequency: core.frequency_hz,
            base_can_id: core.base_can_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    pub duration: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration: SimulatorConfig::default().duration_secs,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Build the library configuration from the file values
    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig::new()
            .with_bitrate(self.bus.bitrate)
            .with_frequency(self.bus.frequency)
            .with_base_can_id(self.bus.base_can_id)
            .with_duration(self.run.duration)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [bus]
            bitrate = 500000
            frequency = 20
            base_can_id = 8192

            [run]
            duration = 60

            [output]
            log_file = "stream.txt"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.bus.bitrate, 500_000);
        assert_eq!(config.bus.frequency, 20);
        assert_eq!(config.bus.base_can_id, 0x2000);
        assert_eq!(config.run.duration, 60);
        assert_eq!(config.output.log_file, Some(PathBuf::from("stream.txt")));
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let toml_content = r#"
            [run]
            duration = 5
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.bus.frequency, 10);
        assert_eq!(config.bus.bitrate, 1_000_000);
        assert_eq!(config.run.duration, 5);
        assert!(config.output.log_file.is_none());

        let sim = config.simulator_config();
        assert_eq!(sim.duration_secs, 5);
        assert!(sim.validate().is_ok());
    }
}
