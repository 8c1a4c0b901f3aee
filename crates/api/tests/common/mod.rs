use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{NaiveDate, NaiveDateTime};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fleetlens_api::config::ServerConfig;
use fleetlens_api::router::build_router;
use fleetlens_api::state::AppState;

/// The fixed corpus day used by all integration tests.
pub const TEST_REFERENCE_DATE: &str = "2013-09-12";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        db_acquire_timeout_secs: 10,
        reference_date_fallback: reference_date(),
        fare_per_occupied_ping: 15.0,
        heatmap_weight_cap: None,
    }
}

pub fn reference_date() -> NaiveDate {
    TEST_REFERENCE_DATE.parse().unwrap()
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` (same `build_router`)
/// so integration tests exercise the same middleware stack that production
/// uses. The reference date is pinned to the test corpus day instead of
/// being resolved from the table, so tests control it explicitly.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        reference_date: reference_date(),
    };
    build_router(state)
}

/// Issue a GET request against the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds"),
    )
    .await
    .expect("infallible service")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Insert one GPS ping with heading 0. Raw and corrected coordinates are
/// seeded equal; only the corrected pair is read by the analytics queries.
#[allow(clippy::too_many_arguments)]
pub async fn insert_ping(
    pool: &PgPool,
    vehicle_id: &str,
    recorded_at: &str,
    lat: f64,
    lon: f64,
    speed_kmh: f64,
    occupied: bool,
    event_tag: i16,
    trip_id: Option<i64>,
) {
    insert_ping_with_heading(
        pool, vehicle_id, recorded_at, lat, lon, speed_kmh, 0.0, occupied, event_tag, trip_id,
    )
    .await;
}

/// Insert one GPS ping with an explicit heading in degrees.
#[allow(clippy::too_many_arguments)]
pub async fn insert_ping_with_heading(
    pool: &PgPool,
    vehicle_id: &str,
    recorded_at: &str,
    lat: f64,
    lon: f64,
    speed_kmh: f64,
    heading: f64,
    occupied: bool,
    event_tag: i16,
    trip_id: Option<i64>,
) {
    let recorded_at = NaiveDateTime::parse_from_str(recorded_at, "%Y-%m-%d %H:%M:%S")
        .expect("test timestamp parses");
    sqlx::query(
        "INSERT INTO gps_pings \
            (vehicle_id, recorded_at, raw_lat, raw_lon, corrected_lat, corrected_lon, \
             speed_kmh, heading, occupied, event_tag, trip_id) \
         VALUES ($1, $2, $3, $4, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(vehicle_id)
    .bind(recorded_at)
    .bind(lat)
    .bind(lon)
    .bind(speed_kmh)
    .bind(heading)
    .bind(occupied)
    .bind(event_tag)
    .bind(trip_id)
    .execute(pool)
    .await
    .expect("seed insert succeeds");
}
