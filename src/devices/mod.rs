pub mod traits;
pub mod gps;

pub use traits::{DeviceHandle, DeviceOpener};
pub use gps::{FrameReader, GpsService, RawFrame, Reading};
