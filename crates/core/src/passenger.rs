//! Passenger event statistics and trip-level occupancy.

use serde::Serialize;

use crate::types::{percent_of, EventTag};

/// Aggregate statistics for one event tag over a resolved range.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerEventStat {
    pub event_tag: EventTag,
    pub label: &'static str,
    pub count: i64,
    pub avg_speed: f64,
    pub vehicle_count: i64,
}

impl PassengerEventStat {
    /// Finish a raw per-tag aggregation row.
    pub fn from_row(tag: i16, count: i64, avg_speed: Option<f64>, vehicle_count: i64) -> Self {
        let event_tag = EventTag::from_i16(tag);
        Self {
            event_tag,
            label: event_tag.label(),
            count,
            avg_speed: avg_speed.unwrap_or(0.0).round(),
            vehicle_count,
        }
    }
}

/// Trip-level occupancy statistics.
///
/// `occupied_time` and `empty_time` count ongoing-occupied and ongoing-empty
/// pings as a time-unit proxy (pings arrive at a fixed cadence); the
/// occupancy rate is derived from those two counts only, not from the
/// boolean occupancy flag.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripStats {
    pub total_trips: i64,
    pub occupied_time: i64,
    pub empty_time: i64,
    pub occupancy_rate: f64,
}

impl TripStats {
    pub fn new(total_trips: i64, occupied_time: i64, empty_time: i64) -> Self {
        Self {
            total_trips,
            occupied_time,
            empty_time,
            occupancy_rate: percent_of(occupied_time, occupied_time + empty_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_rows_carry_labels() {
        let stat = PassengerEventStat::from_row(1, 2, Some(8.2), 2);
        assert_eq!(stat.event_tag, EventTag::Pickup);
        assert_eq!(stat.label, "Pickup");
        assert_eq!(stat.count, 2);
        assert_eq!(stat.avg_speed, 8.0);

        let stat = PassengerEventStat::from_row(2, 1, None, 1);
        assert_eq!(stat.event_tag, EventTag::Dropoff);
        assert_eq!(stat.count, 1);
        assert_eq!(stat.avg_speed, 0.0);
    }

    #[test]
    fn occupancy_rate_uses_ongoing_tags_only() {
        // Pickup/dropoff-only traffic has no ongoing time at all.
        let stats = TripStats::new(3, 0, 0);
        assert_eq!(stats.occupancy_rate, 0.0);

        let stats = TripStats::new(10, 30, 10);
        assert_eq!(stats.occupancy_rate, 75.0);
    }

    #[test]
    fn occupancy_rate_is_bounded() {
        let stats = TripStats::new(1, 100, 0);
        assert_eq!(stats.occupancy_rate, 100.0);
        let stats = TripStats::new(1, 0, 100);
        assert_eq!(stats.occupancy_rate, 0.0);
    }
}
