//! Time source traits

use headway_feeds::ClockReading;

use super::FetchError;

/// Network time source
///
/// Blocking; the reading comes back in whichever of the three shapes the
/// upstream happened to answer with.
pub trait ClockSource {
    /// Fetch the current time
    fn fetch_time(&mut self) -> Result<ClockReading, FetchError>;
}

/// The host's monotonic clock
///
/// Injected everywhere elapsed time matters so the whole session can run
/// against a fake clock in tests. Implementations need not share an epoch
/// with anything; only differences are ever taken.
pub trait Monotonic {
    /// Milliseconds since an arbitrary fixed origin, non-decreasing
    fn now_ms(&mut self) -> u64;

    /// Block for the given duration
    fn sleep_ms(&mut self, duration_ms: u32);
}
