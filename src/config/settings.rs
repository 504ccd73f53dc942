use clap::ArgMatches;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::devices::gps::gps_reader::{LineSettings, DEFAULT_FRAME_CAPACITY};
use crate::utils::error::GpsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Device
    pub device_path: String,
    pub baud_rate: u32,
    pub frame_capacity: usize,
    pub configure_port: bool,       // Apply line settings once at startup
    pub read_timeout_ms: Option<u64>, // None keeps the blocking read

    // Exposure endpoint
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub enabled: bool,
    pub bind_address: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_path: "/dev/ttyS0".to_string(),
            baud_rate: 9600,
            frame_capacity: DEFAULT_FRAME_CAPACITY,
            configure_port: true,
            read_timeout_ms: None,
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Apply command line overrides on top of `self`.
    pub fn apply_matches(mut self, matches: &ArgMatches) -> Result<Self, GpsError> {
        if let Some(port) = matches.get_one::<String>("port") {
            self.device_path = port.clone();
        }
        if let Some(baud) = matches.get_one::<String>("baud") {
            self.baud_rate = parse_arg("baud", baud)?;
        }
        if let Some(capacity) = matches.get_one::<String>("capacity") {
            self.frame_capacity = parse_arg("capacity", capacity)?;
        }
        if let Some(timeout) = matches.get_one::<String>("timeout") {
            self.read_timeout_ms = Some(parse_arg("timeout", timeout)?);
        }
        if matches.get_flag("no-configure") {
            self.configure_port = false;
        }

        self.validate()?;
        Ok(self)
    }

    /// Defaults, or the file named by `--config`, then command line overrides.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, GpsError> {
        let base = match matches.get_one::<String>("config") {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.apply_matches(matches)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GpsError> {
        let path = path.as_ref();
        debug!("📄 Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)
            .map_err(|e| GpsError::ConfigError(format!("Cannot read {}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GpsError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), GpsError> {
        if self.device_path.trim().is_empty() {
            return Err(GpsError::ConfigError("device_path must not be empty".to_string()));
        }
        if self.baud_rate == 0 {
            return Err(GpsError::ConfigError("baud_rate must be positive".to_string()));
        }
        // One byte is reserved for the terminator.
        if self.frame_capacity < 2 {
            return Err(GpsError::ConfigError(format!(
                "frame_capacity must be at least 2, got {}",
                self.frame_capacity
            )));
        }
        if self.read_timeout_ms == Some(0) {
            return Err(GpsError::ConfigError("read_timeout_ms must be positive".to_string()));
        }
        Ok(())
    }

    pub fn line_settings(&self) -> LineSettings {
        LineSettings::nmea(self.baud_rate)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}

fn parse_arg<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, GpsError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| GpsError::ConfigError(format!("Invalid --{} value {:?}: {}", name, value, e)))
}
