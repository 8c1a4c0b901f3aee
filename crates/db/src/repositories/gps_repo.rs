//! Read-only aggregation queries over the `gps_pings` corpus.
//!
//! Every method takes a resolved [`TimeRangeFilter`] and pushes its values
//! as bound parameters via the [`crate::filter`] helpers. The store is
//! read-mostly historical data; none of these queries write.

use chrono::{Days, NaiveDate, NaiveTime};
use fleetlens_core::time_range::TimeRangeFilter;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::filter::{push_point_predicate, push_range_predicate};
use crate::models::{
    BaseStatsRow, EventRow, HeadingRow, HotspotRow, HourlyActivityRow, HourlyCountRow,
    ModuleRow, PingRow, SamplePointRow, SpeedBandRow, TripRow, VehicleRow,
};

/// Provides the aggregate read operations of the analytics core.
pub struct GpsRepo;

impl GpsRepo {
    /// The corpus reference date: the calendar day of the newest ping.
    ///
    /// Resolved once at startup so every consumer of a request shares the
    /// same notion of "today". `None` when the table is empty.
    pub async fn reference_date(pool: &PgPool) -> Result<Option<NaiveDate>, sqlx::Error> {
        sqlx::query_scalar("SELECT MAX(recorded_at)::date FROM gps_pings")
            .fetch_one(pool)
            .await
    }

    /// Hour-bucket module index over the full resolved range.
    ///
    /// Ignores any module narrowing: the index always describes the whole
    /// range so a client can page between modules. Ordered ascending by
    /// (date, hour); an empty range yields an empty list.
    pub async fn list_modules(
        pool: &PgPool,
        filter: &TimeRangeFilter,
    ) -> Result<Vec<ModuleRow>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT recorded_at::date AS date, \
                    EXTRACT(HOUR FROM recorded_at)::int AS hour, \
                    COUNT(*) AS ping_count, \
                    COUNT(*) FILTER (WHERE occupied) AS occupied_count, \
                    AVG(speed_kmh) AS avg_speed \
             FROM gps_pings",
        );
        push_range_predicate(&mut qb, filter);
        qb.push(" GROUP BY 1, 2 ORDER BY 1, 2");
        qb.build_query_as::<ModuleRow>().fetch_all(pool).await
    }

    /// One page of raw pings for the weighted heatmap, narrowed to the
    /// selected module when one is present.
    ///
    /// Ordered by `(recorded_at, id)` — a stable key, so concatenating
    /// pages 1..k yields no duplicates and no gaps.
    pub async fn fetch_heatmap_page(
        pool: &PgPool,
        filter: &TimeRangeFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PingRow>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT corrected_lat, corrected_lon, speed_kmh, occupied, event_tag, recorded_at \
             FROM gps_pings",
        );
        push_point_predicate(&mut qb, filter);
        qb.push(" ORDER BY recorded_at, id LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);
        let rows = qb.build_query_as::<PingRow>().fetch_all(pool).await?;
        tracing::debug!(
            returned = rows.len(),
            limit,
            offset,
            "Fetched heatmap page"
        );
        Ok(rows)
    }

    /// Grid-cell hotspot aggregation.
    ///
    /// Cells are coordinates rounded to 3 decimals; only cells with
    /// strictly more than `min_density` pings survive, capped to the
    /// densest `cap` cells.
    pub async fn list_hotspots(
        pool: &PgPool,
        filter: &TimeRangeFilter,
        min_density: i64,
        cap: i64,
    ) -> Result<Vec<HotspotRow>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT ROUND(corrected_lat::numeric, 3)::float8 AS cell_lat, \
                    ROUND(corrected_lon::numeric, 3)::float8 AS cell_lng, \
                    AVG(corrected_lat) AS centroid_lat, \
                    AVG(corrected_lon) AS centroid_lng, \
                    COUNT(*) AS count, \
                    AVG(speed_kmh) AS avg_speed, \
                    COUNT(*) FILTER (WHERE occupied) AS occupied_count \
             FROM gps_pings",
        );
        push_range_predicate(&mut qb, filter);
        qb.push(" GROUP BY 1, 2 HAVING COUNT(*) > ");
        qb.push_bind(min_density);
        qb.push(" ORDER BY count DESC LIMIT ");
        qb.push_bind(cap);
        qb.build_query_as::<HotspotRow>().fetch_all(pool).await
    }

    /// Per-vehicle activity summaries, busiest vehicles first.
    pub async fn list_vehicle_summaries(
        pool: &PgPool,
        filter: &TimeRangeFilter,
        cap: i64,
    ) -> Result<Vec<VehicleRow>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT vehicle_id, \
                    COUNT(*) AS record_count, \
                    AVG(speed_kmh) AS avg_speed, \
                    MAX(speed_kmh) AS max_speed, \
                    MIN(speed_kmh) AS min_speed, \
                    COUNT(*) FILTER (WHERE occupied) AS occupied_count, \
                    COUNT(*) FILTER (WHERE NOT occupied) AS empty_count, \
                    MIN(recorded_at) AS first_seen, \
                    MAX(recorded_at) AS last_seen \
             FROM gps_pings",
        );
        push_range_predicate(&mut qb, filter);
        qb.push(" GROUP BY vehicle_id ORDER BY record_count DESC LIMIT ");
        qb.push_bind(cap);
        qb.build_query_as::<VehicleRow>().fetch_all(pool).await
    }

    /// Sparse hour-of-day ping counts (0-23, dates collapsed).
    pub async fn hourly_distribution(
        pool: &PgPool,
        filter: &TimeRangeFilter,
    ) -> Result<Vec<HourlyCountRow>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT EXTRACT(HOUR FROM recorded_at)::int AS hour, COUNT(*) AS count \
             FROM gps_pings",
        );
        push_range_predicate(&mut qb, filter);
        qb.push(" GROUP BY 1 ORDER BY 1");
        qb.build_query_as::<HourlyCountRow>().fetch_all(pool).await
    }

    /// Sparse hour-of-day activity for the revenue series.
    pub async fn hourly_activity(
        pool: &PgPool,
        filter: &TimeRangeFilter,
    ) -> Result<Vec<HourlyActivityRow>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT EXTRACT(HOUR FROM recorded_at)::int AS hour, \
                    COUNT(*) AS total_records, \
                    COUNT(*) FILTER (WHERE occupied) AS occupied_records, \
                    AVG(speed_kmh) AS avg_speed, \
                    COUNT(DISTINCT vehicle_id) AS active_vehicles \
             FROM gps_pings",
        );
        push_range_predicate(&mut qb, filter);
        qb.push(" GROUP BY 1 ORDER BY 1");
        qb.build_query_as::<HourlyActivityRow>().fetch_all(pool).await
    }

    /// Counts per fixed 10 km/h speed band (ordinal 0-5, 50+ folded into 5).
    pub async fn speed_distribution(
        pool: &PgPool,
        filter: &TimeRangeFilter,
    ) -> Result<Vec<SpeedBandRow>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT LEAST(FLOOR(speed_kmh / 10.0), 5)::smallint AS ordinal, \
                    COUNT(*) AS count \
             FROM gps_pings",
        );
        push_range_predicate(&mut qb, filter);
        qb.push(" GROUP BY 1 ORDER BY 1");
        qb.build_query_as::<SpeedBandRow>().fetch_all(pool).await
    }

    /// Counts per 45-degree heading bin.
    pub async fn heading_distribution(
        pool: &PgPool,
        filter: &TimeRangeFilter,
    ) -> Result<Vec<HeadingRow>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT FLOOR(heading / 45.0) * 45.0 AS heading_bin, \
                    COUNT(*) AS count, \
                    AVG(speed_kmh) AS avg_speed \
             FROM gps_pings",
        );
        push_range_predicate(&mut qb, filter);
        qb.push(" GROUP BY 1 ORDER BY 1");
        qb.build_query_as::<HeadingRow>().fetch_all(pool).await
    }

    /// Per-event-tag statistics (pickup, dropoff, ongoing states).
    pub async fn passenger_events(
        pool: &PgPool,
        filter: &TimeRangeFilter,
    ) -> Result<Vec<EventRow>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT event_tag, \
                    COUNT(*) AS count, \
                    AVG(speed_kmh) AS avg_speed, \
                    COUNT(DISTINCT vehicle_id) AS vehicle_count \
             FROM gps_pings",
        );
        push_range_predicate(&mut qb, filter);
        qb.push(" AND event_tag BETWEEN 1 AND 4 GROUP BY event_tag ORDER BY event_tag");
        qb.build_query_as::<EventRow>().fetch_all(pool).await
    }

    /// Trip-level counters: distinct trips, ongoing-occupied and
    /// ongoing-empty ping counts (the time-unit proxy for occupancy).
    pub async fn trip_stats(
        pool: &PgPool,
        filter: &TimeRangeFilter,
    ) -> Result<TripRow, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(DISTINCT trip_id) AS total_trips, \
                    COUNT(*) FILTER (WHERE event_tag = 3) AS occupied_time, \
                    COUNT(*) FILTER (WHERE event_tag = 4) AS empty_time \
             FROM gps_pings",
        );
        push_range_predicate(&mut qb, filter);
        qb.build_query_as::<TripRow>().fetch_one(pool).await
    }

    /// Range-wide base statistics.
    pub async fn base_stats(
        pool: &PgPool,
        filter: &TimeRangeFilter,
    ) -> Result<BaseStatsRow, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) AS total_records, \
                    COUNT(DISTINCT vehicle_id) AS unique_vehicles, \
                    AVG(speed_kmh) AS avg_speed, \
                    AVG(CASE WHEN occupied THEN 1.0 ELSE 0.0 END)::float8 AS occupied_share, \
                    MIN(recorded_at) AS earliest, \
                    MAX(recorded_at) AS latest \
             FROM gps_pings",
        );
        push_range_predicate(&mut qb, filter);
        qb.build_query_as::<BaseStatsRow>().fetch_one(pool).await
    }

    /// Bounded, time-ordered unweighted point sample for the summary map.
    pub async fn point_sample(
        pool: &PgPool,
        filter: &TimeRangeFilter,
        limit: i64,
    ) -> Result<Vec<SamplePointRow>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT corrected_lat, corrected_lon, heading, speed_kmh, occupied, \
                    event_tag, trip_id, recorded_at \
             FROM gps_pings",
        );
        push_range_predicate(&mut qb, filter);
        qb.push(" ORDER BY recorded_at, id LIMIT ");
        qb.push_bind(limit);
        qb.build_query_as::<SamplePointRow>().fetch_all(pool).await
    }

    /// Distinct vehicle ids active on the reference day, for the UI filter.
    pub async fn available_plates(
        pool: &PgPool,
        reference: NaiveDate,
        limit: i64,
    ) -> Result<Vec<String>, sqlx::Error> {
        let start = reference.and_time(NaiveTime::MIN);
        let end = reference
            .checked_add_days(Days::new(1))
            .unwrap_or(reference)
            .and_time(NaiveTime::MIN);
        sqlx::query_scalar(
            "SELECT DISTINCT vehicle_id FROM gps_pings \
             WHERE recorded_at >= $1 AND recorded_at < $2 \
             ORDER BY vehicle_id LIMIT $3",
        )
        .bind(start)
        .bind(end)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
