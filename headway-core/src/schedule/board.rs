//! Per-direction arrival board
//!
//! Rebuilt from scratch every poll cycle; nothing here persists across
//! cycles.

use heapless::{String, Vec};

use headway_feeds::payload::{
    ArrivalRecord, TransitPayload, MAX_ARRIVALS, MAX_ROUTE_LEN, MAX_TIMESTAMP_LEN,
};

use crate::clock::iso8601_to_epoch;

/// Minutes between canonical time and an arrival's scheduled UTC instant
///
/// Floor division: an arrival 361 seconds out is 6 minutes away, one 359
/// seconds out is 5. Uniform policy for every ETA in the system.
pub fn eta_minutes(arrival_epoch: i64, now: i64) -> i32 {
    (arrival_epoch - now).div_euclid(60) as i32
}

/// One arrival normalized for display
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Arrival {
    /// Route identifier
    pub route: String<MAX_ROUTE_LEN>,
    /// Whole minutes until the scheduled instant
    pub eta_min: i32,
    /// Original feed timestamp, retained for display/debugging
    pub scheduled_at: String<MAX_TIMESTAMP_LEN>,
}

/// Filtered, per-direction schedule view for one station
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleBoard {
    /// Upward arrivals, in feed order
    pub up: Vec<Arrival, MAX_ARRIVALS>,
    /// Downward arrivals, in feed order
    pub down: Vec<Arrival, MAX_ARRIVALS>,
    /// Records dropped because their timestamp would not parse
    pub dropped: u8,
}

impl ScheduleBoard {
    /// Build the board from a feed payload
    ///
    /// Keeps only arrivals strictly more than `min_minutes` out, preserving
    /// feed order within each direction (the feed is pre-sorted by time; no
    /// re-sort here). A missing or empty station entry yields an empty
    /// board - absence of trains is a normal result, not an error. A record
    /// whose timestamp fails to parse is dropped and counted.
    pub fn build(payload: &TransitPayload, now: i64, min_minutes: i32) -> Self {
        let mut board = Self::default();

        let Some(station) = payload.station() else {
            return board;
        };

        board.collect_direction(&station.n, now, min_minutes, true);
        board.collect_direction(&station.s, now, min_minutes, false);
        board
    }

    fn collect_direction(
        &mut self,
        records: &[ArrivalRecord],
        now: i64,
        min_minutes: i32,
        upward: bool,
    ) {
        for record in records {
            let arrival_epoch = match iso8601_to_epoch(record.time.as_str()) {
                Ok(epoch) => epoch,
                Err(_) => {
                    self.dropped = self.dropped.saturating_add(1);
                    continue;
                }
            };

            let eta_min = eta_minutes(arrival_epoch, now);
            if eta_min <= min_minutes {
                continue;
            }

            let arrival = Arrival {
                route: record.route.clone(),
                eta_min,
                scheduled_at: record.time.clone(),
            };
            let slot = if upward { &mut self.up } else { &mut self.down };
            // Capacity matches the feed bound, so this cannot overflow
            let _ = slot.push(arrival);
        }
    }

    /// True when neither direction has a qualifying arrival
    pub fn is_empty(&self) -> bool {
        self.up.is_empty() && self.down.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headway_feeds::payload::decode_transit;

    /// Feed fixture: `now` is 2026-01-07T19:33:01Z
    const NOW: i64 = 1_767_814_381;

    fn payload_from(json: &str) -> TransitPayload {
        decode_transit(json.as_bytes()).unwrap()
    }

    #[test]
    fn test_eta_minutes_floor() {
        assert_eq!(eta_minutes(NOW + 361, NOW), 6);
        assert_eq!(eta_minutes(NOW + 359, NOW), 5);
        assert_eq!(eta_minutes(NOW + 600, NOW), 10);
        assert_eq!(eta_minutes(NOW - 59, NOW), -1);
    }

    #[test]
    fn test_strict_threshold() {
        // 19:39:02 is now+361s (6 min), 19:38:01 is exactly now+300s (5 min)
        let payload = payload_from(
            r#"{"data":[{"N":[
                {"route":"A","time":"2026-01-07T19:39:02+00:00"},
                {"route":"C","time":"2026-01-07T19:38:01+00:00"}
            ]}]}"#,
        );
        let board = ScheduleBoard::build(&payload, NOW, 5);

        assert_eq!(board.up.len(), 1);
        assert_eq!(board.up[0].route.as_str(), "A");
        assert_eq!(board.up[0].eta_min, 6);
    }

    #[test]
    fn test_feed_order_is_preserved() {
        let payload = payload_from(
            r#"{"data":[{"S":[
                {"route":"C","time":"2026-01-07T19:43:01+00:00"},
                {"route":"A","time":"2026-01-07T19:53:01+00:00"},
                {"route":"C","time":"2026-01-07T20:03:01+00:00"}
            ]}]}"#,
        );
        let board = ScheduleBoard::build(&payload, NOW, 5);

        let order: Vec<&str, 4> = board.down.iter().map(|a| a.route.as_str()).collect();
        assert_eq!(&order[..], &["C", "A", "C"]);
        assert_eq!(board.down[0].eta_min, 10);
        assert_eq!(board.down[1].eta_min, 20);
        assert_eq!(board.down[2].eta_min, 30);
    }

    #[test]
    fn test_empty_payload_is_empty_board() {
        for json in [r#"{}"#, r#"{"data":[]}"#] {
            let board = ScheduleBoard::build(&payload_from(json), NOW, 5);
            assert!(board.is_empty());
            assert_eq!(board.dropped, 0);
        }
    }

    #[test]
    fn test_unparseable_record_is_dropped_and_counted() {
        let payload = payload_from(
            r#"{"data":[{"N":[
                {"route":"A","time":"not a timestamp"},
                {"route":"C","time":"2026-01-07T19:53:01+00:00"}
            ]}]}"#,
        );
        let board = ScheduleBoard::build(&payload, NOW, 5);

        assert_eq!(board.up.len(), 1);
        assert_eq!(board.up[0].route.as_str(), "C");
        assert_eq!(board.dropped, 1);
    }

    #[test]
    fn test_retains_original_timestamp() {
        let payload = payload_from(
            r#"{"data":[{"N":[{"route":"A","time":"2026-01-07T14:53:01-05:00"}]}]}"#,
        );
        let board = ScheduleBoard::build(&payload, NOW, 5);
        assert_eq!(board.up[0].scheduled_at.as_str(), "2026-01-07T14:53:01-05:00");
    }
}
