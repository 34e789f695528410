//! Weather feed trait

use headway_feeds::WeatherPayload;

use super::FetchError;

/// Current-conditions feed
pub trait WeatherFeed {
    /// Fetch current weather for a city query
    ///
    /// Blocking. The engine checks for a missing API key before calling,
    /// so implementations always receive one.
    fn fetch_weather(&mut self, city: &str, api_key: &str) -> Result<WeatherPayload, FetchError>;
}
