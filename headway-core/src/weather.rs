//! Weather snapshot normalization
//!
//! Weather is decorative next to the arrivals, so nothing about it is ever
//! allowed to fail the cycle: a missing API key or an unusable payload
//! degrades to a placeholder snapshot and the sign keeps scrolling.

use heapless::String;

use headway_feeds::payload::{WeatherPayload, MAX_DESCRIPTION_LEN};

/// Current conditions, refreshed on the weather cadence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherSnapshot {
    /// Capitalized condition phrase, e.g. "Light Rain"
    pub description: String<MAX_DESCRIPTION_LEN>,
    /// Temperature in whole degrees Fahrenheit (truncated)
    pub temp_f: i16,
}

impl WeatherSnapshot {
    /// Placeholder for an unusable payload or failed fetch
    pub fn unknown() -> Self {
        Self::placeholder("Unknown")
    }

    /// Placeholder for a missing API key
    pub fn no_api_key() -> Self {
        Self::placeholder("No API Key")
    }

    fn placeholder(text: &str) -> Self {
        let mut description = String::new();
        let _ = description.push_str(text);
        Self {
            description,
            temp_f: 0,
        }
    }

    /// Normalize a decoded weather payload
    ///
    /// The first condition's description is capitalized word by word; an
    /// absent or empty description degrades to "Unknown". Temperature is
    /// truncated toward zero.
    pub fn from_payload(payload: &WeatherPayload) -> Self {
        let description = payload
            .weather
            .first()
            .map(|condition| condition.description.as_str())
            .filter(|text| !text.is_empty());

        match description {
            Some(text) => Self {
                description: capitalize_words(text),
                temp_f: payload.main.temp as i16,
            },
            None => Self {
                temp_f: payload.main.temp as i16,
                ..Self::unknown()
            },
        }
    }
}

/// Uppercase the first letter of each ASCII word, lowercase the rest
fn capitalize_words(input: &str) -> String<MAX_DESCRIPTION_LEN> {
    let mut out = String::new();
    let mut at_word_start = true;
    for ch in input.chars() {
        let mapped = if ch == ' ' {
            at_word_start = true;
            ch
        } else if at_word_start {
            at_word_start = false;
            ch.to_ascii_uppercase()
        } else {
            ch.to_ascii_lowercase()
        };
        if out.push(mapped).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use headway_feeds::payload::decode_weather;

    #[test]
    fn test_capitalizes_each_word() {
        assert_eq!(capitalize_words("light rain").as_str(), "Light Rain");
        assert_eq!(
            capitalize_words("THUNDERSTORM WITH DRIZZLE").as_str(),
            "Thunderstorm With Drizzle"
        );
        assert_eq!(capitalize_words("mist").as_str(), "Mist");
    }

    #[test]
    fn test_from_payload() {
        let payload =
            decode_weather(br#"{"weather":[{"description":"light rain"}],"main":{"temp":40.7}}"#)
                .unwrap();
        let snapshot = WeatherSnapshot::from_payload(&payload);

        assert_eq!(snapshot.description.as_str(), "Light Rain");
        assert_eq!(snapshot.temp_f, 40); // truncated, not rounded
    }

    #[test]
    fn test_missing_description_degrades_to_unknown() {
        let payload = decode_weather(br#"{"weather":[],"main":{"temp":-3.9}}"#).unwrap();
        let snapshot = WeatherSnapshot::from_payload(&payload);

        assert_eq!(snapshot.description.as_str(), "Unknown");
        assert_eq!(snapshot.temp_f, -3);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(WeatherSnapshot::unknown().description.as_str(), "Unknown");
        assert_eq!(
            WeatherSnapshot::no_api_key().description.as_str(),
            "No API Key"
        );
        assert_eq!(WeatherSnapshot::no_api_key().temp_f, 0);
    }
}
