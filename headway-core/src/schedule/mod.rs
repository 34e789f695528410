//! Schedule aggregation
//!
//! Raw arrival records become a bounded, display-ready view in two steps:
//! [`board::ScheduleBoard`] filters and normalizes per direction, then
//! [`routes::RouteTable`] folds each direction into an ordered per-route
//! summary of the next few trains.

pub mod board;
pub mod routes;

pub use board::{eta_minutes, Arrival, ScheduleBoard};
pub use routes::{RouteEntry, RouteTable, MAX_ETAS_PER_ROUTE, MAX_ROUTES};

/// Physical travel direction of a scroll line
///
/// Named independently of any one transit system's terminology; the feed's
/// compass keys map onto these when the board is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
}
