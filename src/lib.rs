//! GPRMC status service
//!
//! Reads one bounded frame from a serial GPS receiver per poll, finds the
//! `$GPRMC` sentence in it, and republishes time, date and position as a
//! single status line. The latest line is cached and can be served over HTTP.

pub mod cli;
pub mod config;
pub mod devices;
pub mod nmea;
pub mod output;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use devices::{DeviceOpener, FrameReader, GpsService, RawFrame, Reading};
pub use storage::{ReadingCache, StatusString};
pub use utils::error::GpsError;

#[cfg(feature = "api")]
pub use services::ApiService;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
