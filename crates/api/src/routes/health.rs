//! Health check endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
///
/// Liveness plus a database round-trip; `db_healthy` is `false` rather than
/// an error when the pool cannot reach the store.
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_healthy = fleetlens_db::health_check(&state.pool).await.is_ok();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "db_healthy": db_healthy,
    }))
}
