//! Composed scene handed to the renderer
//!
//! A scene is two layers, Down drawn behind Up, each an ordered sequence
//! of elements positioned relative to the layer origin. The renderer adds
//! the layer's scroll origin to each element's x and rasterizes; all
//! geometry decisions were already made at composition time.

use heapless::{String, Vec};

use headway_feeds::payload::MAX_ROUTE_LEN;

/// Maximum text run length (longest is the weather description)
pub const MAX_TEXT_LEN: usize = 48;

/// Maximum elements per line
/// (label + badge/ETA pair per route + three weather elements)
pub const MAX_ELEMENTS: usize = 24;

/// One positioned element of a scroll line
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    /// Text run drawn in the line color at the fixed glyph pitch
    Text { x: i32, text: String<MAX_TEXT_LEN> },
    /// Colored route badge with the route id centered in it
    Badge {
        x: i32,
        route: String<MAX_ROUTE_LEN>,
    },
    /// Small superscript degree ring
    Degree { x: i32 },
}

/// Composed content of one scroll line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineContent {
    /// Elements in left-to-right order, x relative to the line origin
    pub elements: Vec<Element, MAX_ELEMENTS>,
    /// Total content width in pixels
    pub width: i32,
}

/// One line of a scene: composed content plus its current scroll origin
#[derive(Debug, Clone, Copy)]
pub struct Layer<'a> {
    pub content: &'a LineContent,
    /// Current x of the line origin in frame coordinates
    pub origin_x: i32,
}

/// The full frame the renderer is asked to draw
///
/// Layers are ordered back to front: Down first, then Up.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub down: Layer<'a>,
    pub up: Layer<'a>,
}

impl<'a> Scene<'a> {
    pub fn new(
        up: &'a LineContent,
        up_origin_x: i32,
        down: &'a LineContent,
        down_origin_x: i32,
    ) -> Self {
        Self {
            down: Layer {
                content: down,
                origin_x: down_origin_x,
            },
            up: Layer {
                content: up,
                origin_x: up_origin_x,
            },
        }
    }
}
