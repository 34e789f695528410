//! Clock-source reading normalization and the canonical clock
//!
//! The clock service answers in whichever format its upstream happened to
//! use: a bare epoch number, broken-out calendar fields, or a formatted
//! string like `"2026-01-07 12:07:30.065 007 3 -0800 PST"`. All three are
//! normalized into UTC epoch seconds here, once, at the sync point.

use headway_feeds::{CalendarFields, ClockReading};

use super::calendar::{civil_to_epoch, SECS_PER_HOUR, SECS_PER_MINUTE};
use super::{parse_hms, parse_ymd, TimeFormatError};

/// Normalize a raw clock reading into UTC epoch seconds
///
/// The calendar branch treats its fields as wall-clock values of an
/// unspecified zone - the service supplies no offset there, so callers
/// must not rely on zone correctness for that shape.
pub fn normalize_reading(reading: &ClockReading) -> Result<i64, TimeFormatError> {
    match reading {
        ClockReading::Epoch(seconds) => Ok(*seconds),
        ClockReading::Calendar(fields) => Ok(calendar_to_epoch(fields)),
        ClockReading::Text(text) => parse_clock_text(text.as_str()),
    }
}

fn calendar_to_epoch(fields: &CalendarFields) -> i64 {
    civil_to_epoch(
        fields.year as i32,
        fields.month,
        fields.day,
        fields.hour,
        fields.minute,
        fields.second,
    )
}

/// Parse the formatted string shape positionally
///
/// Token 0 is the date, token 1 the time (fractional seconds truncated),
/// and token 4 - when present and well-formed - a signed `±HHMM` offset.
/// A missing or malformed offset token defaults to `+0000` rather than
/// failing the whole reading.
fn parse_clock_text(text: &str) -> Result<i64, TimeFormatError> {
    let mut tokens = text.split_whitespace();
    let date = tokens.next().ok_or(TimeFormatError::Truncated)?;
    let time = tokens.next().ok_or(TimeFormatError::Truncated)?;
    let offset_seconds = tokens.nth(2).and_then(parse_hhmm_offset).unwrap_or(0);

    let (year, month, day) = parse_ymd(date)?;
    let (hour, minute, second) = parse_hms(time)?;

    // Subtracting the offset converts the local fields to UTC
    Ok(civil_to_epoch(year, month, day, hour, minute, second) - offset_seconds)
}

/// Parse a `±HHMM` offset token: sign, then two digit pairs
fn parse_hhmm_offset(token: &str) -> Option<i64> {
    if token.len() < 5 {
        return None;
    }
    let sign = match token.as_bytes()[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let hours: i64 = token.get(1..3)?.parse().ok()?;
    let minutes: i64 = token.get(3..5)?.parse().ok()?;
    Some(sign * (hours * SECS_PER_HOUR + minutes * SECS_PER_MINUTE))
}

/// The single source of "now" for ETA computation
///
/// Holds the last successfully normalized reading together with the
/// monotonic timestamp it was taken at, and *derives* the current epoch
/// from the pair; the stored value is never advanced in place. Derived
/// values are non-decreasing as long as the source itself does not skew
/// backwards.
///
/// A reading that fails to parse leaves the previous sync standing - the
/// extrapolated clock is this device's best available wall time, and a
/// briefly stale clock beats a blank sign. The failure is reported to the
/// caller and counted for diagnostics.
#[derive(Debug, Clone)]
pub struct CanonicalClock {
    synced_epoch: Option<i64>,
    synced_at_ms: u64,
    fallbacks: u32,
}

impl Default for CanonicalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl CanonicalClock {
    /// Create a clock that has never been synced
    pub const fn new() -> Self {
        Self {
            synced_epoch: None,
            synced_at_ms: 0,
            fallbacks: 0,
        }
    }

    /// Absorb a fresh reading taken at monotonic time `now_ms`
    ///
    /// On success, returns the normalized epoch. On failure, the previous
    /// sync is kept, the fallback counter is bumped, and the parse error
    /// is returned for logging.
    pub fn sync(&mut self, reading: &ClockReading, now_ms: u64) -> Result<i64, TimeFormatError> {
        match normalize_reading(reading) {
            Ok(epoch) => {
                self.synced_epoch = Some(epoch);
                self.synced_at_ms = now_ms;
                Ok(epoch)
            }
            Err(error) => {
                self.fallbacks = self.fallbacks.wrapping_add(1);
                Err(error)
            }
        }
    }

    /// Record that no usable reading arrived this cycle
    pub fn mark_fallback(&mut self) {
        self.fallbacks = self.fallbacks.wrapping_add(1);
    }

    /// Current UTC epoch seconds, derived from the last sync
    ///
    /// A clock that has never synced reads as the epoch origin; the first
    /// successful sync corrects it.
    pub fn now(&self, now_ms: u64) -> i64 {
        match self.synced_epoch {
            Some(epoch) => epoch + (now_ms.saturating_sub(self.synced_at_ms) / 1000) as i64,
            None => 0,
        }
    }

    /// Whether at least one reading has been absorbed
    pub fn is_synced(&self) -> bool {
        self.synced_epoch.is_some()
    }

    /// How many readings were unusable and fell back to extrapolation
    pub fn fallback_count(&self) -> u32 {
        self.fallbacks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;

    fn text_reading(text: &str) -> ClockReading {
        let mut s = String::new();
        let _ = s.push_str(text);
        ClockReading::Text(s)
    }

    #[test]
    fn test_epoch_passthrough() {
        assert_eq!(
            normalize_reading(&ClockReading::Epoch(1_767_814_381)),
            Ok(1_767_814_381)
        );
    }

    #[test]
    fn test_calendar_fields() {
        let reading = ClockReading::Calendar(CalendarFields {
            year: 2026,
            month: 1,
            day: 7,
            hour: 19,
            minute: 33,
            second: 1,
        });
        assert_eq!(normalize_reading(&reading), Ok(1_767_814_381));
    }

    #[test]
    fn test_text_with_negative_offset() {
        // -0800 local: UTC is local + 28800
        let local = civil_to_epoch(2026, 1, 7, 12, 7, 30);
        let reading = text_reading("2026-01-07 12:07:30.065 007 3 -0800 PST");
        assert_eq!(normalize_reading(&reading), Ok(local + 28_800));
    }

    #[test]
    fn test_text_fraction_is_truncated_not_rounded() {
        let a = normalize_reading(&text_reading("2026-01-07 12:07:30.065 007 3 +0000 UTC"));
        let b = normalize_reading(&text_reading("2026-01-07 12:07:30.999 007 3 +0000 UTC"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_text_missing_offset_defaults_to_utc() {
        let reading = text_reading("2026-01-07 12:07:30.065");
        assert_eq!(
            normalize_reading(&reading),
            Ok(civil_to_epoch(2026, 1, 7, 12, 7, 30))
        );
    }

    #[test]
    fn test_text_malformed_offset_defaults_to_utc() {
        let reading = text_reading("2026-01-07 12:07:30.065 007 3 PST?? x");
        assert_eq!(
            normalize_reading(&reading),
            Ok(civil_to_epoch(2026, 1, 7, 12, 7, 30))
        );
    }

    #[test]
    fn test_text_garbage_is_an_error() {
        assert!(normalize_reading(&text_reading("not a time")).is_err());
    }

    #[test]
    fn test_canonical_clock_derives_now() {
        let mut clock = CanonicalClock::new();
        assert!(!clock.is_synced());

        clock
            .sync(&ClockReading::Epoch(1_000_000), 5_000)
            .unwrap();
        assert_eq!(clock.now(5_000), 1_000_000);
        assert_eq!(clock.now(12_500), 1_000_007); // 7.5s later, truncated
    }

    #[test]
    fn test_canonical_clock_keeps_previous_sync_on_parse_failure() {
        let mut clock = CanonicalClock::new();
        clock.sync(&ClockReading::Epoch(1_000_000), 0).unwrap();

        let result = clock.sync(&text_reading("garbage"), 60_000);
        assert!(result.is_err());
        assert_eq!(clock.fallback_count(), 1);
        // Previous sync extrapolates forward
        assert_eq!(clock.now(60_000), 1_000_060);
    }

    #[test]
    fn test_canonical_clock_is_non_decreasing() {
        let mut clock = CanonicalClock::new();
        clock.sync(&ClockReading::Epoch(500), 0).unwrap();

        let mut previous = clock.now(0);
        for now_ms in (0..120_000).step_by(700) {
            let current = clock.now(now_ms);
            assert!(current >= previous);
            previous = current;
        }
    }
}
