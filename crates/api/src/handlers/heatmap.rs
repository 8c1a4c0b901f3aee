//! Handler for the module index + module-scoped weighted heatmap endpoint.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use fleetlens_core::heatmap::HeatmapPoint;
use fleetlens_core::modules::TimeModule;
use fleetlens_core::time_range::{ModuleKey, RangeToken, TimeRangeFilter};
use fleetlens_core::types::EventTag;
use fleetlens_db::GpsRepo;

use crate::error::AppResult;
use crate::handlers::{normalize_plate, parse_numeric_param};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Default and maximum heatmap page size. One hour module rarely exceeds a
/// few pages at this size, and a single response stays bounded no matter
/// how wide the requested range is.
pub const DEFAULT_PAGE_SIZE: i64 = 10_000;
pub const MAX_PAGE_SIZE: i64 = 10_000;

/// Query params for `GET /analysis/taxi/heatmap-modules`.
///
/// `page`/`pageSize` arrive as strings so non-numeric input maps to the
/// service's own invalid-parameter envelope instead of a framework reject.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapModulesQuery {
    pub time_range: Option<String>,
    pub plate: Option<String>,
    pub module_key: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Payload of the heatmap-modules endpoint.
///
/// `has_more` is a heuristic continuation signal (`returned == pageSize`),
/// not an exact total-count guarantee.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapModulesData {
    pub modules: Vec<TimeModule>,
    pub heatmap_data: Vec<HeatmapPoint>,
    pub current_module: String,
    pub page: i64,
    pub page_size: i64,
    pub has_more: bool,
}

/// GET /api/v1/analysis/taxi/heatmap-modules
///
/// Returns the hour-module index for the resolved range plus one
/// time-ordered page of weighted points, narrowed to `moduleKey` when given.
pub async fn heatmap_modules(
    State(state): State<AppState>,
    Query(params): Query<HeatmapModulesQuery>,
) -> AppResult<impl IntoResponse> {
    // Validate everything before touching the pool.
    let token = RangeToken::parse(params.time_range.as_deref().unwrap_or("today"));
    let module = params
        .module_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .map(ModuleKey::parse)
        .transpose()?;
    let page = parse_numeric_param(params.page.as_deref(), "page", 1)?.max(1);
    let page_size = parse_numeric_param(params.page_size.as_deref(), "pageSize", DEFAULT_PAGE_SIZE)?
        .clamp(1, MAX_PAGE_SIZE);

    let filter = TimeRangeFilter::resolve(
        token,
        state.reference_date,
        normalize_plate(params.plate),
        module,
    );

    // Module index over the whole range; the module narrowing applies only
    // to the point page below.
    let modules: Vec<TimeModule> = GpsRepo::list_modules(&state.pool, &filter)
        .await?
        .into_iter()
        .map(|row| {
            TimeModule::from_bucket(
                row.date,
                row.hour,
                row.ping_count,
                row.occupied_count,
                row.avg_speed,
            )
        })
        .collect();

    // An offset beyond i64 is simply past the end of any module.
    let offset = (page - 1).checked_mul(page_size).unwrap_or(i64::MAX);
    let rows = GpsRepo::fetch_heatmap_page(&state.pool, &filter, page_size, offset).await?;

    let weights = state.config.weight_config();
    let has_more = rows.len() as i64 == page_size;
    let heatmap_data: Vec<HeatmapPoint> = rows
        .into_iter()
        .map(|row| {
            HeatmapPoint::from_ping(
                &weights,
                row.corrected_lon,
                row.corrected_lat,
                row.speed_kmh,
                row.occupied,
                EventTag::from_i16(row.event_tag),
                row.recorded_at,
            )
        })
        .collect();

    Ok(Json(ApiResponse::ok(HeatmapModulesData {
        modules,
        heatmap_data,
        current_module: filter.module.map(|m| m.key()).unwrap_or_default(),
        page,
        page_size,
        has_more,
    })))
}
