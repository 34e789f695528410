//! Request/response messages carried over the link
//!
//! Message bodies are postcard-encoded. The sign MCU only ever sends
//! [`LinkRequest`] frames and receives [`LinkResponse`] frames; the
//! co-processor does the reverse. Both directions live here so the two
//! firmwares share one definition.

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use crate::link::{encode_frame, LinkError, LinkFrame, MAX_BODY_LEN};
use crate::payload::ClockReading;

/// Frame kind: sign MCU -> co-processor
pub const KIND_REQUEST: u8 = 0x11;

/// Frame kind: co-processor -> sign MCU
pub const KIND_RESPONSE: u8 = 0x12;

/// Maximum station identifier length
pub const MAX_STATION_LEN: usize = 8;

/// Maximum city query length ("New York,US")
pub const MAX_CITY_LEN: usize = 24;

/// Maximum API key length
pub const MAX_KEY_LEN: usize = 40;

/// Requests the sign MCU can make of the co-processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkRequest {
    /// Current network time
    GetTime,
    /// Arrival board for one station
    GetArrivals { station: String<MAX_STATION_LEN> },
    /// Current weather for a city query
    GetWeather {
        city: String<MAX_CITY_LEN>,
        key: Option<String<MAX_KEY_LEN>>,
    },
}

/// Failure kinds reported by the co-processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteError {
    /// Not associated with an access point
    NoNetwork,
    /// Name resolution failed
    Dns,
    /// Connection refused, reset, or timed out
    Connect,
    /// Non-success HTTP status
    Http(u16),
}

/// Responses the co-processor sends back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkResponse {
    /// Answer to `GetTime`
    Time(ClockReading),
    /// Raw HTTP response body for `GetArrivals` / `GetWeather`
    Body(Vec<u8, MAX_BODY_LEN>),
    /// The fetch failed upstream
    Failed(RemoteError),
}

impl LinkRequest {
    /// Encode this request as a complete frame, returning bytes written
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, LinkError> {
        let mut body = [0u8; 128];
        let used = postcard::to_slice(self, &mut body)
            .map_err(|_| LinkError::Codec)?
            .len();
        encode_frame(KIND_REQUEST, &body[..used], out)
    }

    /// Decode a request from a received frame body
    pub fn decode(frame: &LinkFrame) -> Result<Self, LinkError> {
        if frame.kind != KIND_REQUEST {
            return Err(LinkError::Codec);
        }
        postcard::from_bytes(&frame.body).map_err(|_| LinkError::Codec)
    }
}

impl LinkResponse {
    /// Encode this response as a complete frame, returning bytes written
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, LinkError> {
        let mut body = [0u8; MAX_BODY_LEN + 8];
        let used = postcard::to_slice(self, &mut body)
            .map_err(|_| LinkError::Codec)?
            .len();
        encode_frame(KIND_RESPONSE, &body[..used], out)
    }

    /// Decode a response from a received frame body
    pub fn decode(frame: &LinkFrame) -> Result<Self, LinkError> {
        if frame.kind != KIND_RESPONSE {
            return Err(LinkError::Codec);
        }
        postcard::from_bytes(&frame.body).map_err(|_| LinkError::Codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::LinkDecoder;
    use crate::payload::CalendarFields;

    fn roundtrip_request(request: &LinkRequest) -> LinkRequest {
        let mut wire = [0u8; 256];
        let len = request.encode(&mut wire).unwrap();

        let mut decoder = LinkDecoder::new();
        for &byte in &wire[..len - 1] {
            assert_eq!(decoder.push(byte), Ok(None));
        }
        let frame = decoder.push(wire[len - 1]).unwrap().expect("complete frame");
        LinkRequest::decode(&frame).unwrap()
    }

    #[test]
    fn test_request_roundtrip_get_time() {
        assert_eq!(roundtrip_request(&LinkRequest::GetTime), LinkRequest::GetTime);
    }

    #[test]
    fn test_request_roundtrip_get_arrivals() {
        let mut station = String::new();
        let _ = station.push_str("A31");
        let request = LinkRequest::GetArrivals { station };
        assert_eq!(roundtrip_request(&request), request);
    }

    #[test]
    fn test_request_roundtrip_get_weather_without_key() {
        let mut city = String::new();
        let _ = city.push_str("New York,US");
        let request = LinkRequest::GetWeather { city, key: None };
        assert_eq!(roundtrip_request(&request), request);
    }

    #[test]
    fn test_response_roundtrip_time() {
        let response = LinkResponse::Time(ClockReading::Calendar(CalendarFields {
            year: 2026,
            month: 1,
            day: 7,
            hour: 12,
            minute: 7,
            second: 30,
        }));

        let mut wire = [0u8; 256];
        let len = response.encode(&mut wire).unwrap();

        let mut decoder = LinkDecoder::new();
        let mut decoded = None;
        for &byte in &wire[..len] {
            if let Ok(Some(frame)) = decoder.push(byte) {
                decoded = Some(LinkResponse::decode(&frame).unwrap());
            }
        }
        assert_eq!(decoded, Some(response));
    }

    #[test]
    fn test_response_roundtrip_body() {
        let mut body = Vec::new();
        body.extend_from_slice(br#"{"data":[]}"#).unwrap();
        let response = LinkResponse::Body(body);

        let mut wire = [0u8; 256];
        let len = response.encode(&mut wire).unwrap();

        let mut decoder = LinkDecoder::new();
        let mut decoded = None;
        for &byte in &wire[..len] {
            if let Ok(Some(frame)) = decoder.push(byte) {
                decoded = Some(LinkResponse::decode(&frame).unwrap());
            }
        }
        assert_eq!(decoded, Some(response));
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let mut wire = [0u8; 64];
        let len = LinkRequest::GetTime.encode(&mut wire).unwrap();

        let mut decoder = LinkDecoder::new();
        let mut frame = None;
        for &byte in &wire[..len] {
            if let Ok(Some(f)) = decoder.push(byte) {
                frame = Some(f);
            }
        }
        let frame = frame.unwrap();
        assert_eq!(LinkResponse::decode(&frame), Err(LinkError::Codec));
    }
}
