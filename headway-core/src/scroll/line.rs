//! Per-tick scroll geometry
//!
//! Each line scrolls left exactly one pixel per tick - fixed rate, not
//! time-scaled - and wraps by re-entering from the right edge once the
//! content has fully left the frame. The two lines share a rate but not a
//! phase, because their content widths differ.

/// Scroll state of one line
///
/// `advance` reads geometry only; content is rebuilt elsewhere, once per
/// refresh cycle, via [`ScrollLine::rebuild`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollLine {
    content_width: i32,
    position: i32,
}

impl ScrollLine {
    /// Create a line at the origin with the given content width
    pub const fn new(content_width: i32) -> Self {
        Self {
            content_width,
            position: 0,
        }
    }

    /// Install a fresh content width and restart from the origin
    pub fn rebuild(&mut self, content_width: i32) {
        self.content_width = content_width;
        self.position = 0;
    }

    /// Advance one tick
    ///
    /// Wraparound law: once `position <= -content_width` the content is
    /// entirely off the left edge, so it re-enters fully from the right at
    /// `frame_width`.
    pub fn advance(&mut self, frame_width: i32) {
        self.position -= 1;
        if self.position <= -self.content_width {
            self.position = frame_width;
        }
    }

    /// Current origin x in frame coordinates
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Content width the wrap threshold is derived from
    pub fn content_width(&self) -> i32 {
        self.content_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_advance_decrements_by_one() {
        let mut line = ScrollLine::new(100);
        line.advance(64);
        assert_eq!(line.position(), -1);
        line.advance(64);
        assert_eq!(line.position(), -2);
    }

    #[test]
    fn test_wraps_to_right_edge() {
        let mut line = ScrollLine::new(100);
        for _ in 0..99 {
            line.advance(64);
        }
        assert_eq!(line.position(), -99);

        // The 100th tick crosses the threshold and re-enters at the frame edge
        line.advance(64);
        assert_eq!(line.position(), 64);
    }

    #[test]
    fn test_rebuild_resets_phase() {
        let mut line = ScrollLine::new(100);
        for _ in 0..42 {
            line.advance(64);
        }
        line.rebuild(80);
        assert_eq!(line.position(), 0);
        assert_eq!(line.content_width(), 80);
    }

    #[test]
    fn test_lines_wrap_independently() {
        let mut up = ScrollLine::new(90);
        let mut down = ScrollLine::new(150);
        for _ in 0..100 {
            up.advance(64);
            down.advance(64);
        }
        // up wrapped at tick 90, down is still mid-flight
        assert_eq!(up.position(), 64 - 10);
        assert_eq!(down.position(), -100);
    }

    proptest! {
        /// Advancing by content_width + frame_width ticks is a full period:
        /// the line returns to the position it started from.
        #[test]
        fn test_wrap_period(
            content_width in 1i32..400,
            frame_width in 8i32..128,
            phase in 0u32..1000,
        ) {
            let mut line = ScrollLine::new(content_width);
            for _ in 0..phase {
                line.advance(frame_width);
            }

            let start = line.position();
            for _ in 0..(content_width + frame_width) {
                line.advance(frame_width);
            }
            prop_assert_eq!(line.position(), start);
        }
    }
}
