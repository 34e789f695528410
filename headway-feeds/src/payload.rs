//! Payload shapes delivered by the network sources
//!
//! Two independent services feed the sign: the transit API (per-station
//! arrival lists) and the weather API. The time service piggybacks on the
//! co-processor and may answer in any of three formats depending on which
//! upstream it reached, so the clock reading is polymorphic.
//!
//! All types are bounded; decode of an oversized or misshapen body fails
//! cleanly instead of allocating.

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

/// Maximum route identifier length ("A", "GS", "SIR")
pub const MAX_ROUTE_LEN: usize = 4;

/// Maximum ISO-8601 timestamp length
pub const MAX_TIMESTAMP_LEN: usize = 32;

/// Maximum arrivals kept per direction
pub const MAX_ARRIVALS: usize = 16;

/// Maximum weather description length
pub const MAX_DESCRIPTION_LEN: usize = 48;

/// Maximum formatted clock string length
/// ("2026-01-07 12:07:30.065 007 3 -0800 PST" is 39 bytes)
pub const MAX_CLOCK_TEXT_LEN: usize = 48;

/// A raw time reading from the clock service
///
/// Normalization into canonical UTC epoch seconds happens on the sign MCU;
/// this type only preserves whatever the service answered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockReading {
    /// Already an epoch value (UTC seconds)
    Epoch(i64),
    /// Broken-out calendar fields, zone unspecified
    Calendar(CalendarFields),
    /// Formatted string, e.g. "2026-01-07 12:07:30.065 007 3 -0800 PST"
    Text(String<MAX_CLOCK_TEXT_LEN>),
}

/// Calendar fields of a structured time reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalendarFields {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// One scheduled arrival from the transit feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArrivalRecord {
    /// Route identifier, e.g. "A"
    pub route: String<MAX_ROUTE_LEN>,
    /// Scheduled arrival, ISO-8601 with explicit UTC offset
    pub time: String<MAX_TIMESTAMP_LEN>,
}

/// Arrival lists for one station, keyed by track direction
///
/// The feed uses compass keys; the sign maps them onto its own Up/Down
/// directions when aggregating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StationEntry {
    #[serde(rename = "N", default)]
    pub n: Vec<ArrivalRecord, MAX_ARRIVALS>,
    #[serde(rename = "S", default)]
    pub s: Vec<ArrivalRecord, MAX_ARRIVALS>,
}

/// Top-level transit feed response
///
/// The outer sequence holds at most one station for a by-id query. A
/// missing or empty `data` array means no trains, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransitPayload {
    #[serde(default)]
    pub data: Vec<StationEntry, 1>,
}

impl TransitPayload {
    /// The station entry, if the feed returned one
    pub fn station(&self) -> Option<&StationEntry> {
        self.data.first()
    }
}

/// One weather condition entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherCondition {
    #[serde(default)]
    pub description: String<MAX_DESCRIPTION_LEN>,
}

/// Main weather block (imperial units requested, so `temp` is Fahrenheit)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherMain {
    #[serde(default)]
    pub temp: f32,
}

/// Top-level weather feed response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherPayload {
    #[serde(default)]
    pub weather: Vec<WeatherCondition, 3>,
    #[serde(default)]
    pub main: WeatherMain,
}

/// A response body that could not be decoded into its payload type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Body is not valid JSON for the expected shape
    Malformed,
}

/// Decode a transit feed response body
pub fn decode_transit(body: &[u8]) -> Result<TransitPayload, DecodeError> {
    serde_json_core::de::from_slice(body)
        .map(|(payload, _rest)| payload)
        .map_err(|_| DecodeError::Malformed)
}

/// Decode a weather feed response body
pub fn decode_weather(body: &[u8]) -> Result<WeatherPayload, DecodeError> {
    serde_json_core::de::from_slice(body)
        .map(|(payload, _rest)| payload)
        .map_err(|_| DecodeError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_transit_single_station() {
        let body = br#"{"data":[{"N":[{"route":"A","time":"2026-01-07T14:33:01-05:00"}],"S":[]}]}"#;
        let payload = decode_transit(body).unwrap();

        let station = payload.station().unwrap();
        assert_eq!(station.n.len(), 1);
        assert_eq!(station.n[0].route.as_str(), "A");
        assert_eq!(station.n[0].time.as_str(), "2026-01-07T14:33:01-05:00");
        assert!(station.s.is_empty());
    }

    #[test]
    fn test_decode_transit_missing_data_is_empty() {
        let payload = decode_transit(b"{}").unwrap();
        assert!(payload.station().is_none());
    }

    #[test]
    fn test_decode_transit_empty_data_is_empty() {
        let payload = decode_transit(br#"{"data":[]}"#).unwrap();
        assert!(payload.station().is_none());
    }

    #[test]
    fn test_decode_transit_missing_direction_defaults() {
        let body = br#"{"data":[{"S":[{"route":"C","time":"2026-01-07T15:00:00-05:00"}]}]}"#;
        let payload = decode_transit(body).unwrap();

        let station = payload.station().unwrap();
        assert!(station.n.is_empty());
        assert_eq!(station.s.len(), 1);
    }

    #[test]
    fn test_decode_transit_garbage_is_error() {
        assert_eq!(decode_transit(b"not json"), Err(DecodeError::Malformed));
    }

    #[test]
    fn test_decode_weather() {
        let body = br#"{"weather":[{"description":"light rain"}],"main":{"temp":40.7}}"#;
        let report = decode_weather(body).unwrap();

        assert_eq!(report.weather[0].description.as_str(), "light rain");
        assert!((report.main.temp - 40.7).abs() < 0.01);
    }

    #[test]
    fn test_decode_weather_empty_conditions() {
        let report = decode_weather(br#"{"weather":[],"main":{"temp":12.0}}"#).unwrap();
        assert!(report.weather.is_empty());
    }
}
