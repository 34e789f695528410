//! HUB75 panel scan-out
//!
//! A 64x32 panel at 1/16 scan: two rows are shifted at a time (y and
//! y+16), latched, then lit for a plane-weighted interval. Four binary
//! code modulation planes give 16 levels per channel from the top bits of
//! the framebuffer's RGB565.
//!
//! This runs on core 1 and never blocks on anything but its own timing,
//! so a stalled network fetch on core 0 cannot freeze the panel.

use core::sync::atomic::Ordering;

use embassy_rp::gpio::Output;
use embassy_time::Timer;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::channels::{FRAME, INTENSITY};

use super::{FrameBuffer, PANEL_HEIGHT, PANEL_WIDTH};

/// Rows shifted per address (1/16 scan)
const SCAN_ROWS: usize = PANEL_HEIGHT / 2;

/// BCM planes per frame
const PLANES: u8 = 4;

/// On-time of the least significant plane (us)
const BASE_PLANE_US: u64 = 60;

/// The panel's control pins, Interstate 75-style wiring
pub struct Hub75Pins {
    pub r1: Output<'static>,
    pub g1: Output<'static>,
    pub b1: Output<'static>,
    pub r2: Output<'static>,
    pub g2: Output<'static>,
    pub b2: Output<'static>,
    pub addr_a: Output<'static>,
    pub addr_b: Output<'static>,
    pub addr_c: Output<'static>,
    pub addr_d: Output<'static>,
    pub clk: Output<'static>,
    pub lat: Output<'static>,
    /// Active low
    pub oe: Output<'static>,
}

/// Row pair snapshot taken under the frame lock
struct RowPair {
    top: [Rgb565; PANEL_WIDTH],
    bottom: [Rgb565; PANEL_WIDTH],
}

/// Scan one full frame (all planes, all rows)
pub async fn scan_frame(pins: &mut Hub75Pins) {
    let intensity = INTENSITY.load(Ordering::Relaxed);

    for plane in 0..PLANES {
        for row in 0..SCAN_ROWS {
            let pair = snapshot_row_pair(row);
            shift_row_pair(pins, &pair, plane);

            // Latch with output disabled, then select the row
            pins.oe.set_high();
            pins.lat.set_high();
            pins.lat.set_low();
            set_row_address(pins, row as u8);

            if intensity > 0 {
                pins.oe.set_low();
                Timer::after_micros(BASE_PLANE_US << plane).await;
                pins.oe.set_high();
            } else {
                // Dormant: keep the drivers dark but stay responsive
                Timer::after_micros(BASE_PLANE_US).await;
            }
        }
    }
}

/// Copy one row pair out of the shared frame
///
/// The lock is held only for the copy, never across the shift or the
/// lit interval.
fn snapshot_row_pair(row: usize) -> RowPair {
    FRAME.lock(|cell| {
        let frame = cell.borrow();
        RowPair {
            top: copy_row(&frame, row),
            bottom: copy_row(&frame, row + SCAN_ROWS),
        }
    })
}

fn copy_row(frame: &FrameBuffer, y: usize) -> [Rgb565; PANEL_WIDTH] {
    let mut row = [Rgb565::BLACK; PANEL_WIDTH];
    for (x, pixel) in row.iter_mut().enumerate() {
        *pixel = frame.pixel(x, y);
    }
    row
}

/// Shift 64 columns of one plane into the panel registers
fn shift_row_pair(pins: &mut Hub75Pins, pair: &RowPair, plane: u8) {
    for x in 0..PANEL_WIDTH {
        let (r1, g1, b1) = plane_bits(pair.top[x], plane);
        let (r2, g2, b2) = plane_bits(pair.bottom[x], plane);

        pins.r1.set_level(level(r1));
        pins.g1.set_level(level(g1));
        pins.b1.set_level(level(b1));
        pins.r2.set_level(level(r2));
        pins.g2.set_level(level(g2));
        pins.b2.set_level(level(b2));

        pins.clk.set_high();
        pins.clk.set_low();
    }
}

/// Plane bit per channel from the top four bits of each RGB565 component
fn plane_bits(color: Rgb565, plane: u8) -> (bool, bool, bool) {
    let r = (color.r() >> (plane + 1)) & 1 != 0;
    let g = (color.g() >> (plane + 2)) & 1 != 0;
    let b = (color.b() >> (plane + 1)) & 1 != 0;
    (r, g, b)
}

fn level(bit: bool) -> embassy_rp::gpio::Level {
    if bit {
        embassy_rp::gpio::Level::High
    } else {
        embassy_rp::gpio::Level::Low
    }
}

/// Drive the A-D row address lines
fn set_row_address(pins: &mut Hub75Pins, row: u8) {
    pins.addr_a.set_level(level(row & 0x01 != 0));
    pins.addr_b.set_level(level(row & 0x02 != 0));
    pins.addr_c.set_level(level(row & 0x04 != 0));
    pins.addr_d.set_level(level(row & 0x08 != 0));
}
