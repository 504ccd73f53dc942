pub mod gps_data;
pub mod gps_reader;
pub mod gps_service;

pub use gps_data::{RawFrame, Reading};
pub use gps_reader::{configure_device, configure_port, FileOpener, FrameReader, LineSettings, SerialOpener};
pub use gps_service::{process_frame, GpsService};
