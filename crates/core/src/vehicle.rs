//! Per-vehicle aggregate summaries.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::types::{clamp_percent, percent_of};

/// How many vehicles an aggregation fetches from the store.
pub const FETCH_CAP: i64 = 50;

/// How many vehicles the dashboard displays.
pub const DISPLAY_CAP: usize = 20;

/// Activity summary for one vehicle over a resolved range.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub vehicle_id: String,
    pub record_count: i64,
    pub avg_speed: f64,
    pub max_speed: f64,
    pub min_speed: f64,
    pub occupied_count: i64,
    pub empty_count: i64,
    pub occupancy_rate: f64,
    pub first_seen: NaiveDateTime,
    pub last_seen: NaiveDateTime,
    pub active_hours: f64,
}

impl VehicleSummary {
    /// Finish a raw per-vehicle aggregation row.
    ///
    /// `active_hours` is the span between first and last ping; the store
    /// guarantees `last_seen >= first_seen` (MIN/MAX of the same column) so
    /// the value is non-negative. `occupancy_rate` is clamped to [0, 100].
    #[allow(clippy::too_many_arguments)]
    pub fn from_row(
        vehicle_id: String,
        record_count: i64,
        avg_speed: Option<f64>,
        max_speed: Option<f64>,
        min_speed: Option<f64>,
        occupied_count: i64,
        empty_count: i64,
        first_seen: NaiveDateTime,
        last_seen: NaiveDateTime,
    ) -> Self {
        let active_secs = (last_seen - first_seen).num_seconds().max(0);
        Self {
            vehicle_id,
            record_count,
            avg_speed: avg_speed.unwrap_or(0.0).round(),
            max_speed: max_speed.unwrap_or(0.0).round(),
            min_speed: min_speed.unwrap_or(0.0).round(),
            occupied_count,
            empty_count,
            occupancy_rate: clamp_percent(percent_of(occupied_count, record_count)),
            first_seen,
            last_seen,
            active_hours: (active_secs as f64 / 3600.0 * 10.0).round() / 10.0,
        }
    }
}
