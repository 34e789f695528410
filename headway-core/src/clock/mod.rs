//! Time normalization
//!
//! The two network sources disagree about how to say what time it is: the
//! clock service answers in one of three formats, and the transit feed
//! timestamps arrivals in ISO-8601 with a fixed numeric offset. Everything
//! here reduces to one currency - UTC epoch seconds as `i64` - via pure
//! calendar arithmetic. No timezone database is involved; only fixed
//! offsets ever appear on the wire.
//!
//! Sub-second precision is discarded by truncation, never rounding, so an
//! arrival is never reported further away than it is.

pub mod calendar;
pub mod iso8601;
pub mod reading;

pub use iso8601::iso8601_to_epoch;
pub use reading::{normalize_reading, CanonicalClock};

/// Errors from parsing a textual time representation
///
/// These are always recoverable: the caller falls back to a safe default
/// (the extrapolated previous sync, or skipping one arrival record)
/// instead of failing the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeFormatError {
    /// A required token or separator is missing
    Truncated,
    /// A numeric field failed to parse
    BadDigit,
    /// A field parsed but is outside its calendar range
    OutOfRange,
    /// The UTC offset is not in the expected form
    BadOffset,
}

/// Parse a `YYYY-MM-DD` token
pub(crate) fn parse_ymd(token: &str) -> Result<(i32, u8, u8), TimeFormatError> {
    let mut fields = token.split('-');
    let year = next_number(&mut fields)?;
    let month = next_number(&mut fields)?;
    let day = next_number(&mut fields)?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(TimeFormatError::OutOfRange);
    }
    Ok((year as i32, month as u8, day as u8))
}

/// Parse an `HH:MM:SS` token; fractional seconds are truncated
pub(crate) fn parse_hms(token: &str) -> Result<(u8, u8, u8), TimeFormatError> {
    let mut fields = token.split(':');
    let hour = next_number(&mut fields)?;
    let minute = next_number(&mut fields)?;
    let second_token = fields.next().ok_or(TimeFormatError::Truncated)?;
    // "30.065" carries milliseconds; keep the integer part only
    let second_token = second_token.split('.').next().unwrap_or(second_token);
    let second: i64 = second_token
        .parse()
        .map_err(|_| TimeFormatError::BadDigit)?;
    if hour > 23 || minute > 59 || second > 60 {
        return Err(TimeFormatError::OutOfRange);
    }
    Ok((hour as u8, minute as u8, second as u8))
}

fn next_number<'a>(fields: &mut impl Iterator<Item = &'a str>) -> Result<i64, TimeFormatError> {
    let token = fields.next().ok_or(TimeFormatError::Truncated)?;
    token.parse().map_err(|_| TimeFormatError::BadDigit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ymd() {
        assert_eq!(parse_ymd("2026-01-07"), Ok((2026, 1, 7)));
        assert_eq!(parse_ymd("2026-13-07"), Err(TimeFormatError::OutOfRange));
        assert_eq!(parse_ymd("2026-01"), Err(TimeFormatError::Truncated));
        assert_eq!(parse_ymd("2026-0x-07"), Err(TimeFormatError::BadDigit));
    }

    #[test]
    fn test_parse_hms_truncates_fraction() {
        assert_eq!(parse_hms("12:07:30.065"), Ok((12, 7, 30)));
        assert_eq!(parse_hms("12:07:30.999"), Ok((12, 7, 30)));
        assert_eq!(parse_hms("23:59:60"), Ok((23, 59, 60))); // leap second
        assert_eq!(parse_hms("24:00:00"), Err(TimeFormatError::OutOfRange));
        assert_eq!(parse_hms("12:07"), Err(TimeFormatError::Truncated));
    }
}
