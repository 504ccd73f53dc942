use crate::devices::gps::Reading;
use crate::utils::error::GpsError;

pub const NO_GPS_DATA: &str = "No GPS Data";
pub const READ_FAILED: &str = "Failed to read Data from GPS";
pub const MALFORMED_GPS_DATA: &str = "Malformed GPS Data";

/// Width of the hhmmss and ddmmyy tokens.
const STAMP_WIDTH: usize = 6;

/// Split a six-character stamp into three two-character parts.
///
/// The length is checked before any slicing; digits are not range-checked.
fn split_stamp<'a>(field: &'static str, token: Option<&'a str>) -> Result<[&'a str; 3], GpsError> {
    let malformed = || GpsError::MalformedField {
        field,
        value: token.unwrap_or_default().to_string(),
    };

    let token = token.ok_or_else(malformed)?;
    let stamp = token.get(..STAMP_WIDTH).ok_or_else(malformed)?;
    match (stamp.get(0..2), stamp.get(2..4), stamp.get(4..6)) {
        (Some(a), Some(b), Some(c)) => Ok([a, b, c]),
        _ => Err(malformed()),
    }
}

/// Render `UTC: HH:MM:SS, Date: DD/MM/YY, Latitude: <lat>, Longitude: <lon>`.
pub fn format_reading(reading: &Reading) -> Result<String, GpsError> {
    let [hh, mm, ss] = split_stamp("time", reading.utc_time.as_deref())?;
    let [day, month, year] = split_stamp("date", reading.date.as_deref())?;

    Ok(format!(
        "UTC: {}:{}:{}, Date: {}/{}/{}, Latitude: {}, Longitude: {}",
        hh,
        mm,
        ss,
        day,
        month,
        year,
        reading.latitude.as_deref().unwrap_or_default(),
        reading.longitude.as_deref().unwrap_or_default()
    ))
}

/// Status line cached for a recoverable pass failure.
pub fn status_for_error(err: &GpsError) -> Option<&'static str> {
    match err {
        GpsError::NoDataRead => Some(READ_FAILED),
        GpsError::SentenceNotFound => Some(NO_GPS_DATA),
        GpsError::MalformedField { .. } => Some(MALFORMED_GPS_DATA),
        _ => None,
    }
}
