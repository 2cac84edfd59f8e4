//! Timecode codec: `mm:ss` text to and from a numeric seconds offset.
//!
//! All comparisons in the scheduling logic use the numeric form. The textual
//! form is what gets stored and displayed; its zero-padded fixed width is
//! load-bearing for any lexicographic range comparison the storage layer
//! performs, so [`Timecode::fmt`] always pads both fields to two digits.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, CoreResult};

/// Input grammar: minutes 0-59 (optional leading zero), seconds 00-59.
///
/// The two-digit cap on minutes forbids any in-episode offset of an hour or
/// more; values above 59 minutes can still *arise* from arithmetic and will
/// format without wraparound, but cannot be parsed back.
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-5]?[0-9]):([0-5][0-9])$").expect("valid regex"));

/// A non-negative seconds offset within an episode's runtime.
///
/// Ordering and equality are on the numeric seconds value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timecode {
    seconds: u32,
}

impl Timecode {
    /// Build a timecode directly from a seconds offset.
    pub fn from_seconds(seconds: u32) -> Self {
        Self { seconds }
    }

    /// Parse `mm:ss` text. Fails with [`CoreError::TimeFormat`] on anything
    /// outside the input grammar.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let caps = TIME_RE
            .captures(text)
            .ok_or_else(|| CoreError::TimeFormat(text.to_string()))?;

        // Both captures matched `[0-9]{1,2}`, so these cannot fail.
        let minutes: u32 = caps[1].parse().expect("minutes capture is numeric");
        let seconds: u32 = caps[2].parse().expect("seconds capture is numeric");

        Ok(Self {
            seconds: minutes * 60 + seconds,
        })
    }

    /// Total seconds offset, the form used for all comparisons.
    pub fn seconds(&self) -> u32 {
        self.seconds
    }
}

impl fmt::Display for Timecode {
    /// Renders `mm:ss` with both fields zero-padded to two digits.
    ///
    /// Minutes beyond 59 keep their full width rather than wrapping; the
    /// width constraint applies to the input grammar only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}

impl FromStr for Timecode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    #[test]
    fn parses_zero_padded() {
        assert_eq!(Timecode::parse("01:30").unwrap().seconds(), 90);
    }

    #[test]
    fn parses_single_digit_minutes() {
        assert_eq!(Timecode::parse("5:07").unwrap().seconds(), 307);
    }

    #[test]
    fn parses_upper_bound() {
        assert_eq!(Timecode::parse("59:59").unwrap().seconds(), 3599);
    }

    #[test]
    fn rejects_minutes_above_59() {
        assert_matches!(Timecode::parse("75:00"), Err(CoreError::TimeFormat(_)));
    }

    #[test]
    fn rejects_seconds_above_59() {
        assert_matches!(Timecode::parse("10:60"), Err(CoreError::TimeFormat(_)));
    }

    #[test]
    fn rejects_missing_colon() {
        assert_matches!(Timecode::parse("1030"), Err(CoreError::TimeFormat(_)));
    }

    #[test]
    fn rejects_single_digit_seconds() {
        assert_matches!(Timecode::parse("10:5"), Err(CoreError::TimeFormat(_)));
    }

    #[test]
    fn rejects_empty() {
        assert_matches!(Timecode::parse(""), Err(CoreError::TimeFormat(_)));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert_matches!(Timecode::parse("10:30x"), Err(CoreError::TimeFormat(_)));
    }

    // -----------------------------------------------------------------------
    // Formatting
    // -----------------------------------------------------------------------

    #[test]
    fn formats_zero_padded() {
        assert_eq!(Timecode::from_seconds(90).to_string(), "01:30");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(Timecode::from_seconds(0).to_string(), "00:00");
    }

    #[test]
    fn formats_beyond_59_minutes_without_wrap() {
        // 3700s = 61m40s; minutes field exceeds two digits, no wraparound.
        assert_eq!(Timecode::from_seconds(3700).to_string(), "61:40");
    }

    // -----------------------------------------------------------------------
    // Round trip: format(parse(x)) == x for all canonical two-digit inputs
    // -----------------------------------------------------------------------

    #[test]
    fn round_trips_canonical_text() {
        for text in ["00:00", "01:30", "10:05", "59:59", "30:00"] {
            assert_eq!(Timecode::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn single_digit_minutes_normalize_to_two() {
        assert_eq!(Timecode::parse("5:07").unwrap().to_string(), "05:07");
    }

    // -----------------------------------------------------------------------
    // Ordering
    // -----------------------------------------------------------------------

    #[test]
    fn orders_by_numeric_seconds() {
        let a = Timecode::parse("09:59").unwrap();
        let b = Timecode::parse("10:00").unwrap();
        assert!(a < b);
    }
}
