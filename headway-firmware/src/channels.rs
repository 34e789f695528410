//! Cross-core shared state
//!
//! The session task (core 0) composes frames; the panel scanner (core 1)
//! reads them back out continuously. The framebuffer sits behind a
//! critical-section mutex so the two cores never observe a torn frame,
//! and the output intensity is a bare atomic the scanner samples every
//! plane.

use core::cell::RefCell;
use core::sync::atomic::AtomicU8;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::display::FrameBuffer;

/// The frame the scanner is showing
pub static FRAME: Mutex<CriticalSectionRawMutex, RefCell<FrameBuffer>> =
    Mutex::new(RefCell::new(FrameBuffer::new()));

/// Panel output intensity; 0 blanks the panel entirely
pub static INTENSITY: AtomicU8 = AtomicU8::new(255);
