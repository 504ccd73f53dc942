/// Marker that opens a Recommended Minimum (RMC) sentence from a GPS talker.
pub const GPRMC_MARKER: &[u8] = b"$GPRMC";

/// Offset of the first occurrence of `marker` in `content`.
pub fn locate_sentence(content: &[u8], marker: &[u8]) -> Option<usize> {
    if marker.is_empty() || content.len() < marker.len() {
        return None;
    }
    content.windows(marker.len()).position(|window| window == marker)
}

/// The sentence starting at `offset`, ending before the first CR/LF.
///
/// Without a terminator the sentence runs to the end of `content`; a frame
/// that cut the sentence short simply yields fewer fields.
pub fn sentence_at(content: &[u8], offset: usize) -> &[u8] {
    let rest = content.get(offset..).unwrap_or(&[]);
    let end = rest
        .iter()
        .position(|&b| b == b'\r' || b == b'\n')
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Locate the first `$GPRMC` sentence in `content`.
pub fn find_gprmc(content: &[u8]) -> Option<&[u8]> {
    locate_sentence(content, GPRMC_MARKER).map(|offset| sentence_at(content, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_at_start() {
        assert_eq!(locate_sentence(b"$GPRMC,123519,A", GPRMC_MARKER), Some(0));
    }

    #[test]
    fn test_locate_after_partial_sentence() {
        let frame = b"4.4,230394,003.1,W*6A\r\n$GPGGA,123519,4807.038,N\r\n$GPRMC,1235";
        assert_eq!(locate_sentence(frame, GPRMC_MARKER), Some(49));
    }

    #[test]
    fn test_missing_marker() {
        assert_eq!(locate_sentence(b"$GPGGA,123519,4807.038,N", GPRMC_MARKER), None);
        assert_eq!(locate_sentence(b"", GPRMC_MARKER), None);
        assert_eq!(locate_sentence(b"$GPRM", GPRMC_MARKER), None);
    }

    #[test]
    fn test_first_of_several_sentences_wins() {
        let frame = b"$GPRMC,111111,A\r\n$GPRMC,222222,A\r\n";
        assert_eq!(find_gprmc(frame), Some(&b"$GPRMC,111111,A"[..]));
    }

    #[test]
    fn test_sentence_stops_at_line_terminator() {
        let frame = b"noise$GPRMC,123519,A,,,,,,,230394\r\n$GPGSA,A,3";
        assert_eq!(find_gprmc(frame), Some(&b"$GPRMC,123519,A,,,,,,,230394"[..]));
    }

    #[test]
    fn test_unterminated_sentence_runs_to_end() {
        assert_eq!(find_gprmc(b"xx$GPRMC,1235"), Some(&b"$GPRMC,1235"[..]));
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        assert!(sentence_at(b"abc", 10).is_empty());
    }
}
