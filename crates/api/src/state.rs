use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fleetlens_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The corpus reference date, resolved once at startup. Every range
    /// resolution in the process uses this single value so module
    /// boundaries computed by different endpoints cannot diverge.
    pub reference_date: NaiveDate,
}
