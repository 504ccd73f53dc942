use std::io::Read;

/// A readable byte channel for one pass. Dropping it closes the device.
pub type DeviceHandle = Box<dyn Read + Send>;

/// Opens the GPS device read-only. Implemented by real serial/file openers
/// and by in-memory fakes in tests.
pub trait DeviceOpener: Send + Sync {
    fn open(&self, path: &str) -> std::io::Result<DeviceHandle>;

    fn describe(&self) -> &str;
}
