use std::fmt;

/// Bytes returned by a single read of the GPS device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    bytes: Vec<u8>,
}

impl RawFrame {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Everything the read returned.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Scannable content: the read bytes up to the first NUL.
    pub fn content(&self) -> &[u8] {
        let end = self.bytes.iter().position(|&b| b == 0).unwrap_or(self.bytes.len());
        &self.bytes[..end]
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Raw RMC tokens, kept as text. `None` means the sentence ended before the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reading {
    pub utc_time: Option<String>,
    pub status: Option<String>,
    pub latitude: Option<String>,
    pub ns_indicator: Option<String>,
    pub longitude: Option<String>,
    pub ew_indicator: Option<String>,
    pub speed: Option<String>,
    pub course: Option<String>,
    pub date: Option<String>,
}

impl Reading {
    /// True when the sentence carried every field up to and including the date.
    pub fn is_complete(&self) -> bool {
        [
            &self.utc_time,
            &self.status,
            &self.latitude,
            &self.ns_indicator,
            &self.longitude,
            &self.ew_indicator,
            &self.speed,
            &self.course,
            &self.date,
        ]
        .iter()
        .all(|field| field.is_some())
    }

    /// Receiver reported an active ("A") fix.
    pub fn has_valid_fix(&self) -> bool {
        self.status.as_deref() == Some("A")
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "UTC-TIME: {}, Latitude: {}, Longitude: {}, Date: {}",
            show(&self.utc_time),
            show(&self.latitude),
            show(&self.longitude),
            show(&self.date)
        )
    }
}
