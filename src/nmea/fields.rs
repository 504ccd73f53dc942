use crate::devices::gps::Reading;

pub const FIELD_SEPARATOR: char = ',';

// Positions within an RMC sentence; index 0 is the "$GPRMC" marker itself.
//
//        1      2    3     4    5     6   7   8    9     10  11
//        |      |    |     |    |     |   |   |    |      |  |
// $GPRMC,hhmmss,A,ddmm.mm,N,dddmm.mm,E,x.x,x.x,ddmmyy,x.x,W*hh
pub const RMC_TIME: usize = 1;
pub const RMC_STATUS: usize = 2;
pub const RMC_LATITUDE: usize = 3;
pub const RMC_NS: usize = 4;
pub const RMC_LONGITUDE: usize = 5;
pub const RMC_EW: usize = 6;
pub const RMC_SPEED: usize = 7;
pub const RMC_COURSE: usize = 8;
pub const RMC_DATE: usize = 9;

/// Positional tokens of one sentence, empty fields preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> FieldSet<'a> {
    pub fn split(sentence: &'a str) -> Self {
        Self {
            tokens: sentence.split(FIELD_SEPARATOR).collect(),
        }
    }

    /// Token at `index`, or `None` when the sentence ended before it.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Pull the RMC fields out of `sentence`. Fields past the end of a short
/// sentence come back as `None`; everything after the date is ignored.
pub fn extract_reading(sentence: &str) -> Reading {
    let fields = FieldSet::split(sentence);
    let owned = |index: usize| fields.get(index).map(str::to_string);

    Reading {
        utc_time: owned(RMC_TIME),
        status: owned(RMC_STATUS),
        latitude: owned(RMC_LATITUDE),
        ns_indicator: owned(RMC_NS),
        longitude: owned(RMC_LONGITUDE),
        ew_indicator: owned(RMC_EW),
        speed: owned(RMC_SPEED),
        course: owned(RMC_COURSE),
        date: owned(RMC_DATE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";

    #[test]
    fn test_full_sentence() {
        let reading = extract_reading(SAMPLE);
        assert_eq!(reading.utc_time.as_deref(), Some("123519"));
        assert_eq!(reading.status.as_deref(), Some("A"));
        assert_eq!(reading.latitude.as_deref(), Some("4807.038"));
        assert_eq!(reading.ns_indicator.as_deref(), Some("N"));
        assert_eq!(reading.longitude.as_deref(), Some("01131.000"));
        assert_eq!(reading.ew_indicator.as_deref(), Some("E"));
        assert_eq!(reading.speed.as_deref(), Some("022.4"));
        assert_eq!(reading.course.as_deref(), Some("084.4"));
        assert_eq!(reading.date.as_deref(), Some("230394"));
        assert!(reading.is_complete());
    }

    #[test]
    fn test_empty_fields_are_preserved() {
        let fields = FieldSet::split("$GPRMC,,V,,,,,,,230394,,");
        assert_eq!(fields.len(), 12);
        assert_eq!(fields.get(RMC_TIME), Some(""));
        assert_eq!(fields.get(RMC_STATUS), Some("V"));
        assert_eq!(fields.get(RMC_DATE), Some("230394"));
    }

    #[test]
    fn test_truncated_sentence_is_incomplete() {
        let reading = extract_reading("$GPRMC,1235,A");
        assert_eq!(reading.utc_time.as_deref(), Some("1235"));
        assert_eq!(reading.status.as_deref(), Some("A"));
        assert_eq!(reading.latitude, None);
        assert_eq!(reading.date, None);
        assert!(!reading.is_complete());
    }

    #[test]
    fn test_marker_only() {
        let reading = extract_reading("$GPRMC");
        assert_eq!(reading, Reading::default());
    }

    #[test]
    fn test_out_of_range_index() {
        let fields = FieldSet::split("$GPRMC,1");
        assert_eq!(fields.get(RMC_DATE), None);
        assert!(!fields.is_empty());
    }
}
