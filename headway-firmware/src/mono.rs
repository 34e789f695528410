//! Monotonic clock backed by the Embassy time driver

use embassy_time::{block_for, Duration, Instant};

use headway_core::traits::Monotonic;

/// The board's monotonic uptime clock
///
/// `sleep_ms` blocks the session task outright; the panel scanner lives
/// on the other core, so nothing user-visible stalls.
pub struct BoardClock;

impl Monotonic for BoardClock {
    fn now_ms(&mut self) -> u64 {
        Instant::now().as_millis()
    }

    fn sleep_ms(&mut self, duration_ms: u32) {
        block_for(Duration::from_millis(duration_ms as u64));
    }
}
