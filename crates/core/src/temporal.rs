//! Diurnal (hour-of-day) distributions.
//!
//! Pings are bucketed into 24 hour-of-day slots regardless of date; hours
//! with no traffic appear as explicit zeros so charts always get a dense
//! 24-length array.

use serde::Serialize;

/// Default fare credited per occupied ping when estimating revenue.
///
/// An explicit business heuristic, not a measured quantity; override via
/// configuration, never treat as real fare data.
pub const DEFAULT_FARE_PER_OCCUPIED_PING: f64 = 15.0;

/// Build a dense 24-length count array from sparse `(hour, count)` rows.
///
/// Rows with out-of-range hours are ignored rather than panicking; the
/// store derives the hour with `EXTRACT(HOUR ...)` so 0-23 is guaranteed
/// in practice.
pub fn dense_hourly(rows: &[(i32, i64)]) -> [i64; 24] {
    let mut buckets = [0i64; 24];
    for &(hour, count) in rows {
        if let Ok(idx) = usize::try_from(hour) {
            if idx < 24 {
                buckets[idx] = count;
            }
        }
    }
    buckets
}

/// Per-hour activity and revenue estimate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRevenue {
    pub hour: i32,
    pub total_records: i64,
    pub occupied_records: i64,
    pub avg_speed: f64,
    pub active_vehicles: i64,
    pub estimated_revenue: f64,
}

/// Raw per-hour aggregation row, pre-densification.
#[derive(Debug, Clone)]
pub struct HourlyActivity {
    pub hour: i32,
    pub total_records: i64,
    pub occupied_records: i64,
    pub avg_speed: Option<f64>,
    pub active_vehicles: i64,
}

/// Build the dense per-hour revenue series from sparse activity rows.
///
/// `fare_per_occupied_ping` converts occupied ping counts into an estimated
/// revenue figure; hours absent from `rows` contribute all-zero entries.
pub fn build_revenue(rows: &[HourlyActivity], fare_per_occupied_ping: f64) -> Vec<HourlyRevenue> {
    (0..24)
        .map(|hour| {
            match rows.iter().find(|r| r.hour == hour) {
                Some(r) => HourlyRevenue {
                    hour,
                    total_records: r.total_records,
                    occupied_records: r.occupied_records,
                    avg_speed: r.avg_speed.unwrap_or(0.0).round(),
                    active_vehicles: r.active_vehicles,
                    estimated_revenue: (r.occupied_records as f64 * fare_per_occupied_ping)
                        .round(),
                },
                None => HourlyRevenue {
                    hour,
                    total_records: 0,
                    occupied_records: 0,
                    avg_speed: 0.0,
                    active_vehicles: 0,
                    estimated_revenue: 0.0,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_hourly_fills_missing_hours_with_zero() {
        let buckets = dense_hourly(&[(8, 120), (18, 340)]);
        assert_eq!(buckets.len(), 24);
        assert_eq!(buckets[8], 120);
        assert_eq!(buckets[18], 340);
        for (hour, &count) in buckets.iter().enumerate() {
            if hour != 8 && hour != 18 {
                assert_eq!(count, 0, "hour {hour} should be empty");
            }
        }
    }

    #[test]
    fn dense_hourly_ignores_out_of_range_rows() {
        let buckets = dense_hourly(&[(24, 5), (-1, 5), (0, 7)]);
        assert_eq!(buckets[0], 7);
        assert_eq!(buckets.iter().sum::<i64>(), 7);
    }

    #[test]
    fn revenue_series_is_always_24_entries() {
        let rows = vec![HourlyActivity {
            hour: 9,
            total_records: 50,
            occupied_records: 30,
            avg_speed: Some(21.7),
            active_vehicles: 12,
        }];
        let revenue = build_revenue(&rows, DEFAULT_FARE_PER_OCCUPIED_PING);
        assert_eq!(revenue.len(), 24);
        assert_eq!(revenue[9].estimated_revenue, 450.0);
        assert_eq!(revenue[9].avg_speed, 22.0);
        assert_eq!(revenue[10].total_records, 0);
        assert_eq!(revenue[10].estimated_revenue, 0.0);
    }

    #[test]
    fn fare_constant_is_configurable() {
        let rows = vec![HourlyActivity {
            hour: 0,
            total_records: 10,
            occupied_records: 10,
            avg_speed: None,
            active_vehicles: 2,
        }];
        let revenue = build_revenue(&rows, 2.5);
        assert_eq!(revenue[0].estimated_revenue, 25.0);
    }
}
