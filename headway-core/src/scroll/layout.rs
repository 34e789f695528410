//! Analytic line composition
//!
//! Content width is computed here, not measured by the renderer. That only
//! works because every advance is a known constant: the panel font is a
//! 6-pixel-pitch monospace, badges are a fixed 12 pixels plus a 3 pixel
//! gap, and the degree ring is 3 pixels plus a 1 pixel gap. If the
//! renderer's font ever changes pitch, these constants are the single
//! place that must follow.

use core::fmt::Write;

use heapless::String;

use crate::schedule::{Direction, RouteTable};
use crate::weather::WeatherSnapshot;

use super::scene::{Element, LineContent, MAX_TEXT_LEN};

/// Horizontal advance per glyph (monospace)
pub const GLYPH_PITCH: i32 = 6;

/// Route badge advance: 12 px disc + 3 px gap
pub const BADGE_ADVANCE: i32 = 15;

/// Gap after each ETA list
pub const ETA_TRAILING_GAP: i32 = 6;

/// Gap before the trailing weather text
pub const WEATHER_LEAD_IN: i32 = 12;

/// Degree ring advance: 3 px ring + 1 px gap
pub const DEGREE_ADVANCE: i32 = 4;

/// Upward line label
pub const UP_LABEL: &str = "Uptown: ";

/// Downward line label
pub const DOWN_LABEL: &str = "Downtown: ";

/// What trails the arrivals on a line
enum Tail {
    /// Condition phrase ("Light Rain") - upward line
    Description,
    /// Temperature, degree ring, "F" - downward line
    Temperature,
}

impl LineContent {
    /// Compose the upward line: label, per-route arrivals, weather phrase
    pub fn compose_up(routes: &RouteTable, weather: Option<&WeatherSnapshot>) -> Self {
        compose(UP_LABEL, routes, Direction::Up, weather, Tail::Description)
    }

    /// Compose the downward line: label, per-route arrivals, temperature
    pub fn compose_down(routes: &RouteTable, weather: Option<&WeatherSnapshot>) -> Self {
        compose(
            DOWN_LABEL,
            routes,
            Direction::Down,
            weather,
            Tail::Temperature,
        )
    }
}

fn compose(
    label: &str,
    routes: &RouteTable,
    direction: Direction,
    weather: Option<&WeatherSnapshot>,
    tail: Tail,
) -> LineContent {
    let mut content = LineContent::default();
    let mut x = 0;

    push_text(&mut content, &mut x, label);

    for (route, etas) in routes.direction_entries(direction) {
        let mut badge_route = String::new();
        let _ = badge_route.push_str(route);
        let _ = content.elements.push(Element::Badge { x, route: badge_route });
        x += BADGE_ADVANCE;

        let list = join_etas(etas);
        push_text(&mut content, &mut x, list.as_str());
        x += ETA_TRAILING_GAP;
    }

    if let Some(weather) = weather {
        x += WEATHER_LEAD_IN;
        match tail {
            Tail::Description => {
                push_text(&mut content, &mut x, weather.description.as_str());
            }
            Tail::Temperature => {
                let mut digits: String<8> = String::new();
                let _ = write!(digits, "{}", weather.temp_f);
                push_text(&mut content, &mut x, digits.as_str());

                let _ = content.elements.push(Element::Degree { x });
                x += DEGREE_ADVANCE;

                push_text(&mut content, &mut x, "F");
            }
        }
    }

    content.width = x;
    content
}

/// Append a text run at `x` and advance by its glyph extent
fn push_text(content: &mut LineContent, x: &mut i32, text: &str) {
    let mut run: String<MAX_TEXT_LEN> = String::new();
    let _ = run.push_str(text);
    let _ = content.elements.push(Element::Text { x: *x, text: run });
    *x += text.len() as i32 * GLYPH_PITCH;
}

/// Comma-join an ETA list: `[7, 12, 18]` -> `"7,12,18"`
fn join_etas(etas: &[i32]) -> String<16> {
    let mut out = String::new();
    for (index, eta) in etas.iter().enumerate() {
        if index > 0 {
            let _ = out.push(',');
        }
        let _ = write!(out, "{eta}");
    }
    out
}
