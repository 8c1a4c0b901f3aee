//! Handler for the range-wide analytics summary endpoint.
//!
//! The summary is a fan-out over mutually independent aggregates sharing
//! the bounded connection pool. Each aggregate is isolated: a failure
//! degrades its own section to an empty default and appends a warning,
//! instead of aborting the whole response.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use fleetlens_core::hotspot::{self, CellAggregate, HotspotCluster};
use fleetlens_core::passenger::{PassengerEventStat, TripStats};
use fleetlens_core::speed::{build_bands, SpeedBand};
use fleetlens_core::temporal::{build_revenue, dense_hourly, HourlyActivity, HourlyRevenue};
use fleetlens_core::time_range::{RangeToken, TimeRangeFilter};
use fleetlens_core::types::{clamp_percent, EventTag};
use fleetlens_core::vehicle::{VehicleSummary, DISPLAY_CAP, FETCH_CAP};
use fleetlens_db::GpsRepo;

use crate::error::AppResult;
use crate::handlers::normalize_plate;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Bounded size of the unweighted point sample in the summary.
const POINT_SAMPLE_LIMIT: i64 = 5_000;

/// Plates offered to the UI filter dropdown.
const PLATE_LIMIT: i64 = 100;

/// Query params for `GET /analysis/taxi`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    /// Informational only; echoed back so the UI can correlate responses.
    pub metric: Option<String>,
    pub time_range: Option<String>,
    pub plate: Option<String>,
}

/// One unweighted sample point for the summary map layer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplePoint {
    pub lng: f64,
    pub lat: f64,
    pub heading: f64,
    pub speed: f64,
    pub occupied: bool,
    pub event_tag: EventTag,
    pub trip_id: Option<i64>,
    pub time: NaiveDateTime,
}

/// One 45-degree heading bin.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingBin {
    pub heading_bin: f64,
    pub count: i64,
    pub avg_speed: f64,
}

/// Payload of the range-wide analytics summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub total_records: i64,
    pub active_vehicles: i64,
    pub avg_speed: f64,
    pub occupancy_rate: f64,
    pub earliest_time: Option<NaiveDateTime>,
    pub latest_time: Option<NaiveDateTime>,
    pub heatmap_data: Vec<SamplePoint>,
    pub hotspots: Vec<HotspotCluster>,
    pub hourly_data: Vec<i64>,
    pub speed_distribution: Vec<SpeedBand>,
    pub vehicle_details: Vec<VehicleSummary>,
    pub revenue_data: Vec<HourlyRevenue>,
    pub heading_distribution: Vec<HeadingBin>,
    pub available_plates: Vec<String>,
    pub passenger_events: Vec<PassengerEventStat>,
    pub trip_stats: TripStats,
    pub time_range: String,
    pub metric: String,
    pub last_updated: DateTime<Utc>,
    /// Names of aggregate sections that failed and were degraded to their
    /// empty defaults.
    pub warnings: Vec<String>,
}

/// Unwrap one aggregate result, degrading failures to `None` + a warning.
fn section<T>(
    name: &str,
    result: Result<T, sqlx::Error>,
    warnings: &mut Vec<String>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(section = name, error = %err, "Aggregate failed, degrading section");
            warnings.push(format!("{name} unavailable: {err}"));
            None
        }
    }
}

/// GET /api/v1/analysis/taxi
///
/// Runs every independent aggregate concurrently over the same resolved
/// range and merges the results into one summary payload.
pub async fn range_summary(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsQuery>,
) -> AppResult<impl IntoResponse> {
    let time_range = params.time_range.unwrap_or_else(|| "today".to_string());
    let token = RangeToken::parse(&time_range);
    let filter = TimeRangeFilter::resolve(
        token,
        state.reference_date,
        normalize_plate(params.plate),
        None,
    );

    let pool = &state.pool;
    let (
        base,
        hotspot_rows,
        vehicle_rows,
        hourly_rows,
        activity_rows,
        band_rows,
        heading_rows,
        event_rows,
        trip_row,
        sample_rows,
        plates,
    ) = tokio::join!(
        GpsRepo::base_stats(pool, &filter),
        GpsRepo::list_hotspots(pool, &filter, hotspot::MIN_DENSITY, hotspot::MAX_CLUSTERS),
        GpsRepo::list_vehicle_summaries(pool, &filter, FETCH_CAP),
        GpsRepo::hourly_distribution(pool, &filter),
        GpsRepo::hourly_activity(pool, &filter),
        GpsRepo::speed_distribution(pool, &filter),
        GpsRepo::heading_distribution(pool, &filter),
        GpsRepo::passenger_events(pool, &filter),
        GpsRepo::trip_stats(pool, &filter),
        GpsRepo::point_sample(pool, &filter, POINT_SAMPLE_LIMIT),
        GpsRepo::available_plates(pool, state.reference_date, PLATE_LIMIT),
    );

    let mut warnings = Vec::new();

    let base = section("baseStats", base, &mut warnings);
    let (total_records, active_vehicles, avg_speed, occupancy_rate, earliest, latest) =
        match &base {
            Some(b) => (
                b.total_records,
                b.unique_vehicles,
                b.avg_speed.unwrap_or(0.0).round(),
                clamp_percent((b.occupied_share.unwrap_or(0.0) * 100.0).round()),
                b.earliest,
                b.latest,
            ),
            None => (0, 0, 0.0, 0.0, None, None),
        };

    let hotspots = section("hotspots", hotspot_rows, &mut warnings)
        .map(|rows| {
            let cells: Vec<CellAggregate> = rows
                .into_iter()
                .map(|r| CellAggregate {
                    cell_lat: r.cell_lat,
                    cell_lng: r.cell_lng,
                    centroid_lat: r.centroid_lat,
                    centroid_lng: r.centroid_lng,
                    count: r.count,
                    avg_speed: r.avg_speed,
                    occupied_count: r.occupied_count,
                })
                .collect();
            hotspot::rank_cells(cells, hotspot::DISPLAY_CLUSTERS)
        })
        .unwrap_or_default();

    let vehicle_details: Vec<VehicleSummary> =
        section("vehicleDetails", vehicle_rows, &mut warnings)
            .map(|rows| {
                rows.into_iter()
                    .take(DISPLAY_CAP)
                    .map(|r| {
                        VehicleSummary::from_row(
                            r.vehicle_id,
                            r.record_count,
                            r.avg_speed,
                            r.max_speed,
                            r.min_speed,
                            r.occupied_count,
                            r.empty_count,
                            r.first_seen,
                            r.last_seen,
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

    let hourly_data: Vec<i64> = section("hourlyData", hourly_rows, &mut warnings)
        .map(|rows| {
            let sparse: Vec<(i32, i64)> = rows.into_iter().map(|r| (r.hour, r.count)).collect();
            dense_hourly(&sparse).to_vec()
        })
        .unwrap_or_else(|| vec![0; 24]);

    let revenue_data: Vec<HourlyRevenue> = section("revenueData", activity_rows, &mut warnings)
        .map(|rows| {
            let activity: Vec<HourlyActivity> = rows
                .into_iter()
                .map(|r| HourlyActivity {
                    hour: r.hour,
                    total_records: r.total_records,
                    occupied_records: r.occupied_records,
                    avg_speed: r.avg_speed,
                    active_vehicles: r.active_vehicles,
                })
                .collect();
            build_revenue(&activity, state.config.fare_per_occupied_ping)
        })
        .unwrap_or_else(|| build_revenue(&[], state.config.fare_per_occupied_ping));

    let speed_distribution: Vec<SpeedBand> =
        section("speedDistribution", band_rows, &mut warnings)
            .map(|rows| {
                let sparse: Vec<(i16, i64)> =
                    rows.into_iter().map(|r| (r.ordinal, r.count)).collect();
                build_bands(&sparse, total_records)
            })
            .unwrap_or_else(|| build_bands(&[], 0));

    let heading_distribution: Vec<HeadingBin> =
        section("headingDistribution", heading_rows, &mut warnings)
            .map(|rows| {
                rows.into_iter()
                    .map(|r| HeadingBin {
                        heading_bin: r.heading_bin,
                        count: r.count,
                        avg_speed: r.avg_speed.unwrap_or(0.0).round(),
                    })
                    .collect()
            })
            .unwrap_or_default();

    let passenger_events: Vec<PassengerEventStat> =
        section("passengerEvents", event_rows, &mut warnings)
            .map(|rows| {
                rows.into_iter()
                    .map(|r| {
                        PassengerEventStat::from_row(
                            r.event_tag,
                            r.count,
                            r.avg_speed,
                            r.vehicle_count,
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

    let trip_stats = section("tripStats", trip_row, &mut warnings)
        .map(|r| TripStats::new(r.total_trips, r.occupied_time, r.empty_time))
        .unwrap_or_default();

    let heatmap_data: Vec<SamplePoint> = section("heatmapData", sample_rows, &mut warnings)
        .map(|rows| {
            rows.into_iter()
                .map(|r| SamplePoint {
                    lng: r.corrected_lon,
                    lat: r.corrected_lat,
                    heading: r.heading,
                    speed: r.speed_kmh,
                    occupied: r.occupied,
                    event_tag: EventTag::from_i16(r.event_tag),
                    trip_id: r.trip_id,
                    time: r.recorded_at,
                })
                .collect()
        })
        .unwrap_or_default();

    let available_plates =
        section("availablePlates", plates, &mut warnings).unwrap_or_default();

    Ok(Json(ApiResponse::ok(AnalyticsData {
        total_records,
        active_vehicles,
        avg_speed,
        occupancy_rate,
        earliest_time: earliest,
        latest_time: latest,
        heatmap_data,
        hotspots,
        hourly_data,
        speed_distribution,
        vehicle_details,
        revenue_data,
        heading_distribution,
        available_plates,
        passenger_events,
        trip_stats,
        time_range,
        metric: params.metric.unwrap_or_else(|| "orders".to_string()),
        last_updated: Utc::now(),
        warnings,
    })))
}
