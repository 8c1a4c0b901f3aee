//! Hour-granularity time modules.
//!
//! A "module" is one hour bucket of the requested range. Clients page
//! through a wide range one module at a time instead of requesting millions
//! of points in one call, which keeps every response size predictable
//! regardless of how wide the range is.

use chrono::NaiveDate;
use serde::Serialize;

use crate::time_range::ModuleKey;

/// Summary of one hour bucket within a resolved range.
///
/// Modules for a range are contiguous in (date, hour) order, never overlap,
/// and jointly cover exactly the pings in range.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeModule {
    pub key: String,
    pub date: NaiveDate,
    pub hour: i32,
    pub ping_count: i64,
    pub occupied_count: i64,
    pub avg_speed: f64,
    pub label: String,
}

impl TimeModule {
    /// Finish a raw `(date, hour, counts, avg)` aggregation row.
    pub fn from_bucket(
        date: NaiveDate,
        hour: i32,
        ping_count: i64,
        occupied_count: i64,
        avg_speed: Option<f64>,
    ) -> Self {
        let key = ModuleKey {
            date,
            hour: hour as u32,
        };
        Self {
            key: key.key(),
            date,
            hour,
            ping_count,
            occupied_count,
            avg_speed: avg_speed.unwrap_or(0.0).round(),
            label: key.label(),
        }
    }
}
