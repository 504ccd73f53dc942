use log::{debug, error, info, warn};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Read};
use std::time::Duration;

use super::gps_data::RawFrame;
use crate::devices::traits::{DeviceHandle, DeviceOpener};
use crate::utils::error::GpsError;

pub const DEFAULT_FRAME_CAPACITY: usize = 256;

/// Line discipline applied to the receiver's serial port before the first read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSettings {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
}

impl LineSettings {
    /// 8N1, no flow control. Parity checking is off, so parity errors are never raised.
    pub fn nmea(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
        }
    }
}

impl Default for LineSettings {
    fn default() -> Self {
        Self::nmea(9600)
    }
}

/// Apply `settings` to an already-open port.
pub fn configure_port(port: &mut dyn SerialPort, settings: &LineSettings) -> Result<(), GpsError> {
    port.set_baud_rate(settings.baud_rate)?;
    port.set_data_bits(settings.data_bits)?;
    port.set_parity(settings.parity)?;
    port.set_stop_bits(settings.stop_bits)?;
    port.set_flow_control(settings.flow_control)?;
    Ok(())
}

/// Open `path` once and apply `settings`. The settings stay on the tty after
/// the handle is dropped, so later read-only opens inherit them.
pub fn configure_device(path: &str, settings: &LineSettings) -> Result<(), GpsError> {
    info!("🔧 Configuring GPS serial port {} at {} baud", path, settings.baud_rate);

    let mut port = serialport::new(path, settings.baud_rate)
        .open()
        .map_err(|e| GpsError::ConfigurationError(format!("Unable to open {}: {}", path, e)))?;

    configure_port(port.as_mut(), settings)?;

    info!("✅ GPS serial port configured: {:?}", settings);
    Ok(())
}

/// Plain read-only open. A read blocks until the device delivers data.
#[derive(Debug, Default, Clone)]
pub struct FileOpener;

impl DeviceOpener for FileOpener {
    fn open(&self, path: &str) -> std::io::Result<DeviceHandle> {
        let file = OpenOptions::new().read(true).open(path)?;
        Ok(Box::new(file))
    }

    fn describe(&self) -> &str {
        "file (blocking)"
    }
}

/// Opens through `serialport` so a read gives up after `timeout`.
#[derive(Debug, Clone)]
pub struct SerialOpener {
    settings: LineSettings,
    timeout: Duration,
}

impl SerialOpener {
    pub fn new(settings: LineSettings, timeout: Duration) -> Self {
        Self { settings, timeout }
    }
}

impl DeviceOpener for SerialOpener {
    fn open(&self, path: &str) -> std::io::Result<DeviceHandle> {
        let port = serialport::new(path, self.settings.baud_rate)
            .data_bits(self.settings.data_bits)
            .parity(self.settings.parity)
            .stop_bits(self.settings.stop_bits)
            .flow_control(self.settings.flow_control)
            .timeout(self.timeout)
            .open()
            .map_err(std::io::Error::from)?;
        Ok(Box::new(port))
    }

    fn describe(&self) -> &str {
        "serialport (timed)"
    }
}

/// One bounded read per pass.
#[derive(Debug, Clone, Copy)]
pub struct FrameReader {
    capacity: usize,
}

impl Default for FrameReader {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_CAPACITY)
    }
}

impl FrameReader {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Open `path`, read once, close. Only an open failure is fatal.
    pub fn read_frame(&self, opener: &dyn DeviceOpener, path: &str) -> Result<RawFrame, GpsError> {
        let mut device = opener.open(path).map_err(|e| {
            error!("❌ Failed to open GPS device {}: {}", path, e);
            GpsError::DeviceOpenError {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })?;

        let frame = self.read_once(&mut device);
        drop(device);
        frame
    }

    /// Read at most `capacity - 1` bytes; the last slot is reserved for a terminator.
    pub fn read_once<R: Read + ?Sized>(&self, reader: &mut R) -> Result<RawFrame, GpsError> {
        let mut buffer = vec![0u8; self.capacity.saturating_sub(1)];

        match reader.read(&mut buffer) {
            Ok(0) => {
                info!("📭 GPS read returned no data");
                Err(GpsError::NoDataRead)
            }
            Ok(n) => {
                buffer.truncate(n);
                debug!("📥 Read {} bytes from GPS: {}", n, hex::encode(&buffer));
                Ok(RawFrame::new(buffer))
            }
            Err(ref e) if e.kind() == ErrorKind::TimedOut => {
                warn!("⚠️ GPS read timed out");
                Err(GpsError::NoDataRead)
            }
            Err(e) => {
                warn!("⚠️ GPS read error: {}", e);
                Err(GpsError::NoDataRead)
            }
        }
    }
}
