//! Per-route grouping of the arrival board
//!
//! The sign shows at most the next three trains per route per direction.
//! That bound is structural here: the ETA lists simply cannot hold a
//! fourth value, and insertion order makes "the first three seen" the only
//! possible contents. Entries are kept sorted by route id so rendering is
//! deterministic without a sort at draw time.

use heapless::{String, Vec};

use headway_feeds::payload::MAX_ROUTE_LEN;

use super::board::ScheduleBoard;
use super::Direction;

/// Maximum distinct routes shown at once
pub const MAX_ROUTES: usize = 8;

/// Maximum ETA values per route per direction
pub const MAX_ETAS_PER_ROUTE: usize = 3;

/// ETA summary for one route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RouteEntry {
    /// Route identifier
    pub route: String<MAX_ROUTE_LEN>,
    /// Soonest upward ETAs, in arrival order
    pub up: Vec<i32, MAX_ETAS_PER_ROUTE>,
    /// Soonest downward ETAs, in arrival order
    pub down: Vec<i32, MAX_ETAS_PER_ROUTE>,
}

impl RouteEntry {
    fn new(route: &str) -> Self {
        let mut entry = Self::default();
        let _ = entry.route.push_str(route);
        entry
    }

    /// ETA list for one direction
    pub fn etas(&self, direction: Direction) -> &[i32] {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }
}

/// Ordered route -> ETA mapping, rebuilt each cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RouteTable {
    entries: Vec<RouteEntry, MAX_ROUTES>,
}

impl RouteTable {
    /// Fold a board into per-route summaries
    pub fn from_board(board: &ScheduleBoard) -> Self {
        let mut table = Self::default();
        for arrival in &board.up {
            table.record(arrival.route.as_str(), Direction::Up, arrival.eta_min);
        }
        for arrival in &board.down {
            table.record(arrival.route.as_str(), Direction::Down, arrival.eta_min);
        }
        table
    }

    /// Record one arrival, keeping entries sorted by route id
    ///
    /// ETAs beyond the per-direction bound are dropped, as are routes
    /// beyond the table bound.
    fn record(&mut self, route: &str, direction: Direction, eta_min: i32) {
        let index = match self
            .entries
            .binary_search_by(|entry| entry.route.as_str().cmp(route))
        {
            Ok(index) => index,
            Err(index) => {
                if self.entries.insert(index, RouteEntry::new(route)).is_err() {
                    return;
                }
                index
            }
        };

        let list = match direction {
            Direction::Up => &mut self.entries[index].up,
            Direction::Down => &mut self.entries[index].down,
        };
        let _ = list.push(eta_min);
    }

    /// All entries, ascending by route id
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Entries with at least one ETA in the given direction
    pub fn direction_entries(
        &self,
        direction: Direction,
    ) -> impl Iterator<Item = (&str, &[i32])> {
        self.entries
            .iter()
            .map(move |entry| (entry.route.as_str(), entry.etas(direction)))
            .filter(|(_, etas)| !etas.is_empty())
    }

    /// True when no route has any ETA
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::board::Arrival;

    fn arrival(route: &str, eta_min: i32) -> Arrival {
        let mut r = String::new();
        let _ = r.push_str(route);
        Arrival {
            route: r,
            eta_min,
            scheduled_at: String::new(),
        }
    }

    fn board(up: &[(&str, i32)], down: &[(&str, i32)]) -> ScheduleBoard {
        let mut board = ScheduleBoard::default();
        for &(route, eta) in up {
            let _ = board.up.push(arrival(route, eta));
        }
        for &(route, eta) in down {
            let _ = board.down.push(arrival(route, eta));
        }
        board
    }

    #[test]
    fn test_caps_at_three_preserving_first_seen() {
        let up: Vec<(&str, i32), 16> = (0..10).map(|i| ("A", 6 + i)).collect();
        let table = RouteTable::from_board(&board(&up, &[]));

        let entry = &table.entries()[0];
        assert_eq!(&entry.up[..], &[6, 7, 8]);
        assert!(entry.down.is_empty());
    }

    #[test]
    fn test_ascending_route_order() {
        let table = RouteTable::from_board(&board(
            &[("L", 7), ("A", 9), ("C", 11), ("A", 12)],
            &[("1", 8)],
        ));

        let order: Vec<&str, 8> = table.entries().iter().map(|e| e.route.as_str()).collect();
        assert_eq!(&order[..], &["1", "A", "C", "L"]);
        assert_eq!(&table.entries()[1].up[..], &[9, 12]);
    }

    #[test]
    fn test_directions_are_independent() {
        let table = RouteTable::from_board(&board(
            &[("A", 6), ("A", 9)],
            &[("A", 7), ("A", 11), ("A", 15), ("A", 21)],
        ));

        let entry = &table.entries()[0];
        assert_eq!(entry.etas(Direction::Up), &[6, 9]);
        assert_eq!(entry.etas(Direction::Down), &[7, 11, 15]);
    }

    #[test]
    fn test_direction_entries_skips_empty_lists() {
        let table = RouteTable::from_board(&board(&[("A", 6)], &[("C", 7)]));

        let up: Vec<&str, 8> = table
            .direction_entries(Direction::Up)
            .map(|(route, _)| route)
            .collect();
        assert_eq!(&up[..], &["A"]);

        let down: Vec<&str, 8> = table
            .direction_entries(Direction::Down)
            .map(|(route, _)| route)
            .collect();
        assert_eq!(&down[..], &["C"]);
    }

    #[test]
    fn test_route_bound_drops_overflow() {
        let routes = ["1", "2", "3", "4", "5", "6", "7", "A", "B"];
        let up: Vec<(&str, i32), 16> = routes.iter().map(|&r| (r, 10)).collect();
        let table = RouteTable::from_board(&board(&up, &[]));

        assert_eq!(table.entries().len(), MAX_ROUTES);
    }
}
