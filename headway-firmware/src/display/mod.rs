//! Panel rendering
//!
//! [`MatrixSign`] implements the core's renderer trait by rasterizing
//! composed scenes into the shared framebuffer; [`hub75`] scans that
//! framebuffer out to the physical panel. All layout decisions were made
//! upstream - this module only turns elements into pixels.
//!
//! The panel font is FONT_6X10, whose 6-pixel advance is the glyph pitch
//! the core's analytic widths assume.

pub mod hub75;

use core::convert::Infallible;
use core::sync::atomic::Ordering;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Pixel;

use headway_core::scroll::{Element, Layer, Scene};
use headway_core::traits::{Sign, SignError};

use crate::channels::{FRAME, INTENSITY};

/// Panel width in pixels
pub const PANEL_WIDTH: usize = 64;

/// Panel height in pixels
pub const PANEL_HEIGHT: usize = 32;

/// Top of the upward line's text rows
const UP_TEXT_TOP: i32 = 3;

/// Top of the downward line's text rows
const DOWN_TEXT_TOP: i32 = 19;

/// Badge disc sits slightly proud of the text
const BADGE_RAISE: i32 = 2;

/// Upward line text color (amber)
const UP_COLOR: u32 = 0xFF8C40;

/// Downward line text color (sky blue)
const DOWN_COLOR: u32 = 0x6BB6FF;

/// One full frame of panel pixels
pub struct FrameBuffer {
    pixels: [Rgb565; PANEL_WIDTH * PANEL_HEIGHT],
}

impl FrameBuffer {
    /// All-black frame
    pub const fn new() -> Self {
        Self {
            pixels: [Rgb565::BLACK; PANEL_WIDTH * PANEL_HEIGHT],
        }
    }

    /// Blank every pixel
    pub fn blank(&mut self) {
        self.pixels = [Rgb565::BLACK; PANEL_WIDTH * PANEL_HEIGHT];
    }

    /// Pixel at (x, y); out-of-bounds reads are black
    pub fn pixel(&self, x: usize, y: usize) -> Rgb565 {
        if x < PANEL_WIDTH && y < PANEL_HEIGHT {
            self.pixels[y * PANEL_WIDTH + x]
        } else {
            Rgb565::BLACK
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(PANEL_WIDTH as u32, PANEL_HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..PANEL_WIDTH as i32).contains(&point.x)
                && (0..PANEL_HEIGHT as i32).contains(&point.y)
            {
                self.pixels[point.y as usize * PANEL_WIDTH + point.x as usize] = color;
            }
        }
        Ok(())
    }
}

/// The physical sign, drawing into the shared framebuffer
pub struct MatrixSign;

impl MatrixSign {
    pub const fn new() -> Self {
        Self
    }

    /// Draw the boot splash (shown for a couple of seconds before the
    /// first fetch)
    pub fn splash(&mut self) {
        FRAME.lock(|cell| {
            let mut frame = cell.borrow_mut();
            frame.blank();

            let title = MonoTextStyle::new(&FONT_6X10, rgb(UP_COLOR));
            let _ = Text::with_baseline("HEADWAY", Point::new(11, 8), title, Baseline::Top)
                .draw(&mut *frame);

            let rule = MonoTextStyle::new(&FONT_6X10, rgb(DOWN_COLOR));
            let _ = Text::with_baseline("next train", Point::new(2, 19), rule, Baseline::Top)
                .draw(&mut *frame);
        });
    }
}

impl Default for MatrixSign {
    fn default() -> Self {
        Self::new()
    }
}

impl Sign for MatrixSign {
    fn frame_width(&self) -> i32 {
        PANEL_WIDTH as i32
    }

    fn present(&mut self, scene: &Scene<'_>) -> Result<(), SignError> {
        FRAME.lock(|cell| {
            let mut frame = cell.borrow_mut();
            frame.blank();
            // Back to front: Down behind Up
            draw_layer(&mut frame, &scene.down, DOWN_TEXT_TOP, rgb(DOWN_COLOR));
            draw_layer(&mut frame, &scene.up, UP_TEXT_TOP, rgb(UP_COLOR));
        });
        Ok(())
    }

    fn set_intensity(&mut self, intensity: u8) {
        INTENSITY.store(intensity, Ordering::Relaxed);
    }

    fn clear(&mut self) -> Result<(), SignError> {
        FRAME.lock(|cell| cell.borrow_mut().blank());
        Ok(())
    }
}

/// Rasterize one scroll line at its current origin
fn draw_layer(frame: &mut FrameBuffer, layer: &Layer<'_>, text_top: i32, color: Rgb565) {
    let style = MonoTextStyle::new(&FONT_6X10, color);

    for element in &layer.content.elements {
        match element {
            Element::Text { x, text } => {
                let at = Point::new(layer.origin_x + x, text_top);
                let _ = Text::with_baseline(text.as_str(), at, style, Baseline::Top).draw(frame);
            }
            Element::Badge { x, route } => {
                draw_badge(frame, layer.origin_x + x, text_top - BADGE_RAISE, route.as_str());
            }
            Element::Degree { x } => {
                draw_degree(frame, layer.origin_x + x, text_top - BADGE_RAISE, color);
            }
        }
    }
}

/// Filled 12 px disc in the route's color with the id centered in black
fn draw_badge(frame: &mut FrameBuffer, x: i32, y: i32, route: &str) {
    let disc = PrimitiveStyle::with_fill(route_color(route));
    let _ = Circle::new(Point::new(x, y), 12).into_styled(disc).draw(frame);

    let ink = MonoTextStyle::new(&FONT_6X10, Rgb565::BLACK);
    let inset = if route.len() == 1 { 3 } else { 2 };
    let _ = Text::with_baseline(route, Point::new(x + inset, y + 1), ink, Baseline::Top)
        .draw(frame);
}

/// 3x3 hollow ring, superscript-placed
fn draw_degree(frame: &mut FrameBuffer, x: i32, y: i32, color: Rgb565) {
    let ring = [
        Point::new(x + 1, y),
        Point::new(x, y + 1),
        Point::new(x + 2, y + 1),
        Point::new(x + 1, y + 2),
    ];
    let _ = frame.draw_iter(ring.iter().map(|&point| Pixel(point, color)));
}

/// Official route colors; unknown routes render white
fn route_color(route: &str) -> Rgb565 {
    let hex = match route {
        "A" | "C" | "E" => 0x0039A6, // blue
        "B" | "D" | "F" | "M" => 0xFF6319, // orange
        "G" => 0x6CBE45,             // light green
        "J" | "Z" => 0x996633,       // brown
        "L" => 0xA7A9AC,             // gray
        "N" | "Q" | "R" | "W" => 0xFCCC0A, // yellow
        "1" | "2" | "3" => 0xEE352E, // red
        "4" | "5" | "6" => 0x00933C, // green
        "7" => 0xB933AD,             // purple
        "S" => 0x808183,             // shuttle gray
        _ => 0xFFFFFF,
    };
    rgb(hex)
}

/// 24-bit RGB to the panel's RGB565
fn rgb(hex: u32) -> Rgb565 {
    let r = ((hex >> 16) & 0xFF) as u8;
    let g = ((hex >> 8) & 0xFF) as u8;
    let b = (hex & 0xFF) as u8;
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}
