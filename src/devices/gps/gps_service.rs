use log::{debug, error, info, warn};
use std::sync::{Arc, Mutex};

use super::gps_data::RawFrame;
use super::gps_reader::{configure_device, FileOpener, FrameReader, SerialOpener};
use crate::config::Config;
use crate::devices::traits::DeviceOpener;
use crate::nmea::{extract_reading, find_gprmc};
use crate::output::{format_reading, status_for_error};
use crate::storage::{CachedStatus, ReadingCache, StatusString};
use crate::utils::error::GpsError;

/// Locate, extract and format the `$GPRMC` sentence in one frame.
pub fn process_frame(frame: &RawFrame) -> Result<String, GpsError> {
    let sentence = find_gprmc(frame.content()).ok_or(GpsError::SentenceNotFound)?;
    let sentence = String::from_utf8_lossy(sentence);
    debug!("📍 GPRMC sentence: {}", sentence);

    let reading = extract_reading(&sentence);
    info!("🧭 GPS fields: {}", reading);
    if !reading.is_complete() {
        warn!("⚠️ Incomplete GPRMC sentence: {}", sentence);
    } else if !reading.has_valid_fix() {
        debug!("🛰️ Receiver reports no fix (status {:?})", reading.status);
    }

    format_reading(&reading)
}

#[derive(Clone)]
pub struct GpsService {
    config: Config,
    opener: Arc<dyn DeviceOpener>,
    reader: FrameReader,
    cache: ReadingCache,
    pass_guard: Arc<Mutex<()>>,
}

impl GpsService {
    /// Blocking file reads, or timed serial reads when `read_timeout_ms` is set.
    pub fn new(config: Config) -> Self {
        let opener: Arc<dyn DeviceOpener> = match config.read_timeout() {
            Some(timeout) => Arc::new(SerialOpener::new(config.line_settings(), timeout)),
            None => Arc::new(FileOpener),
        };
        Self::with_opener(config, opener)
    }

    pub fn with_opener(config: Config, opener: Arc<dyn DeviceOpener>) -> Self {
        let reader = FrameReader::new(config.frame_capacity);
        Self {
            config,
            opener,
            reader,
            cache: ReadingCache::new(),
            pass_guard: Arc::new(Mutex::new(())),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// One-time startup work. A configuration failure is logged and the
    /// service carries on with whatever settings the port already has.
    pub fn initialize(&self) {
        info!(
            "🧭 GPS service on {} at {} baud, {}-byte frames, {} reads",
            self.config.device_path,
            self.config.baud_rate,
            self.reader.capacity(),
            self.opener.describe()
        );

        if !self.config.configure_port {
            info!("🔧 Serial port configuration skipped");
            return;
        }
        if let Err(e) = self.configure_port() {
            error!("❌ {}; continuing unconfigured", e);
        }
    }

    pub fn configure_port(&self) -> Result<(), GpsError> {
        configure_device(&self.config.device_path, &self.config.line_settings())
    }

    /// Run one open-read-close-parse-format-cache pass.
    ///
    /// Every outcome except an open failure lands in the cache; an open
    /// failure is returned and the cache keeps its previous line.
    pub fn poll(&self) -> Result<StatusString, GpsError> {
        let _pass = self.pass_guard.lock().map_err(|_| GpsError::LockError)?;

        let outcome = self
            .reader
            .read_frame(self.opener.as_ref(), &self.config.device_path)
            .and_then(|frame| process_frame(&frame));

        let status = match outcome {
            Ok(line) => StatusString::new(line),
            Err(err) => match status_for_error(&err) {
                Some(message) => {
                    match err {
                        GpsError::MalformedField { .. } => warn!("⚠️ {}", err),
                        _ => info!("📭 {}", err),
                    }
                    StatusString::new(message)
                }
                None => return Err(err),
            },
        };

        info!("🧭 GPS-Data: {}", status);
        self.cache.store(status.clone())?;
        Ok(status)
    }

    pub fn current_status(&self) -> Result<StatusString, GpsError> {
        self.cache.current()
    }

    pub fn snapshot(&self) -> Result<CachedStatus, GpsError> {
        self.cache.snapshot()
    }
}
