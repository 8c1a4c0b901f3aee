//! `sqlx::FromRow` structs for the GPS ping aggregate queries.
//!
//! These are raw database shapes; the finishing logic (rounding, labels,
//! clamps, dense arrays) lives in `fleetlens-core`.

use chrono::{NaiveDate, NaiveDateTime};

/// One hour-bucket aggregation row for the module index.
#[derive(Debug, sqlx::FromRow)]
pub struct ModuleRow {
    pub date: NaiveDate,
    pub hour: i32,
    pub ping_count: i64,
    pub occupied_count: i64,
    pub avg_speed: Option<f64>,
}

/// One raw ping for the weighted heatmap page.
#[derive(Debug, sqlx::FromRow)]
pub struct PingRow {
    pub corrected_lat: f64,
    pub corrected_lon: f64,
    pub speed_kmh: f64,
    pub occupied: bool,
    pub event_tag: i16,
    pub recorded_at: NaiveDateTime,
}

/// One retained grid cell from the hotspot aggregation.
#[derive(Debug, sqlx::FromRow)]
pub struct HotspotRow {
    pub cell_lat: f64,
    pub cell_lng: f64,
    pub centroid_lat: f64,
    pub centroid_lng: f64,
    pub count: i64,
    pub avg_speed: Option<f64>,
    pub occupied_count: i64,
}

/// One per-vehicle aggregation row.
#[derive(Debug, sqlx::FromRow)]
pub struct VehicleRow {
    pub vehicle_id: String,
    pub record_count: i64,
    pub avg_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_speed: Option<f64>,
    pub occupied_count: i64,
    pub empty_count: i64,
    pub first_seen: NaiveDateTime,
    pub last_seen: NaiveDateTime,
}

/// Sparse hour-of-day count row (densified to 24 entries in core).
#[derive(Debug, sqlx::FromRow)]
pub struct HourlyCountRow {
    pub hour: i32,
    pub count: i64,
}

/// Sparse hour-of-day activity row for the revenue series.
#[derive(Debug, sqlx::FromRow)]
pub struct HourlyActivityRow {
    pub hour: i32,
    pub total_records: i64,
    pub occupied_records: i64,
    pub avg_speed: Option<f64>,
    pub active_vehicles: i64,
}

/// Sparse speed-band row; `ordinal` indexes the fixed band labels.
#[derive(Debug, sqlx::FromRow)]
pub struct SpeedBandRow {
    pub ordinal: i16,
    pub count: i64,
}

/// One 45-degree heading bin.
#[derive(Debug, sqlx::FromRow)]
pub struct HeadingRow {
    pub heading_bin: f64,
    pub count: i64,
    pub avg_speed: Option<f64>,
}

/// One per-event-tag aggregation row.
#[derive(Debug, sqlx::FromRow)]
pub struct EventRow {
    pub event_tag: i16,
    pub count: i64,
    pub avg_speed: Option<f64>,
    pub vehicle_count: i64,
}

/// Trip-level counters over the whole range.
#[derive(Debug, sqlx::FromRow)]
pub struct TripRow {
    pub total_trips: i64,
    pub occupied_time: i64,
    pub empty_time: i64,
}

/// Range-wide base statistics.
#[derive(Debug, sqlx::FromRow)]
pub struct BaseStatsRow {
    pub total_records: i64,
    pub unique_vehicles: i64,
    pub avg_speed: Option<f64>,
    pub occupied_share: Option<f64>,
    pub earliest: Option<NaiveDateTime>,
    pub latest: Option<NaiveDateTime>,
}

/// One unweighted sample point for the summary map layer.
#[derive(Debug, sqlx::FromRow)]
pub struct SamplePointRow {
    pub corrected_lat: f64,
    pub corrected_lon: f64,
    pub heading: f64,
    pub speed_kmh: f64,
    pub occupied: bool,
    pub event_tag: i16,
    pub trip_id: Option<i64>,
    pub recorded_at: NaiveDateTime,
}
