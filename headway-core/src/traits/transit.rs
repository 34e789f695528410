//! Transit feed trait

use headway_feeds::TransitPayload;

use super::FetchError;

/// Arrival feed for one station
pub trait TransitFeed {
    /// Fetch the current arrival board for `station`
    ///
    /// Blocking. An empty payload is a normal answer (no trains), not an
    /// error; `FetchError::Payload` means the body could not be decoded.
    fn fetch_arrivals(&mut self, station: &str) -> Result<TransitPayload, FetchError>;
}
