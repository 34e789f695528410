//! ISO-8601 timestamps with a fixed numeric offset
//!
//! The transit feed stamps every arrival as `YYYY-MM-DDTHH:MM:SS±HH:MM`,
//! offset always present. The offset is located by its sign character
//! scanning from the right: a `+` anywhere is unambiguous, while a `-`
//! must be the last occurrence because the date portion contains two of
//! its own.

use super::calendar::{civil_to_epoch, SECS_PER_HOUR, SECS_PER_MINUTE};
use super::{parse_hms, parse_ymd, TimeFormatError};

/// Parse an ISO-8601 timestamp into UTC epoch seconds
pub fn iso8601_to_epoch(text: &str) -> Result<i64, TimeFormatError> {
    let (sign, at) = match text.rfind('+') {
        Some(at) => (1, at),
        None => {
            let at = text.rfind('-').ok_or(TimeFormatError::BadOffset)?;
            (-1, at)
        }
    };
    let offset_seconds = sign * parse_colon_offset(&text[at + 1..])?;

    let (date, time) = text[..at]
        .split_once('T')
        .ok_or(TimeFormatError::Truncated)?;
    let (year, month, day) = parse_ymd(date)?;
    let (hour, minute, second) = parse_hms(time)?;

    // The fields describe local wall-clock time at the given offset;
    // subtracting the offset yields UTC.
    Ok(civil_to_epoch(year, month, day, hour, minute, second) - offset_seconds)
}

/// Parse an `HH:MM` offset body (sign already consumed)
fn parse_colon_offset(token: &str) -> Result<i64, TimeFormatError> {
    let (hours, minutes) = token.split_once(':').ok_or(TimeFormatError::BadOffset)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(TimeFormatError::BadOffset);
    }
    let hours: i64 = hours.parse().map_err(|_| TimeFormatError::BadOffset)?;
    let minutes: i64 = minutes.parse().map_err(|_| TimeFormatError::BadOffset)?;
    Ok(hours * SECS_PER_HOUR + minutes * SECS_PER_MINUTE)
}
