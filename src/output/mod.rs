pub mod formatters;

pub use formatters::{format_reading, status_for_error, MALFORMED_GPS_DATA, NO_GPS_DATA, READ_FAILED};
