//! Structured filter predicates for ping queries.
//!
//! Range, vehicle, and module restrictions are always pushed through
//! `QueryBuilder::push_bind`, so every request value travels as a bound
//! parameter. Query text is assembled only from static fragments.

use chrono::NaiveDateTime;
use fleetlens_core::time_range::TimeRangeFilter;
use sqlx::{Postgres, QueryBuilder};

/// Push `WHERE recorded_at >= $n AND recorded_at < $m [AND vehicle_id = $k]`
/// for the given half-open interval.
pub fn push_predicate(
    qb: &mut QueryBuilder<'_, Postgres>,
    interval: (NaiveDateTime, NaiveDateTime),
    vehicle_id: Option<&str>,
) {
    qb.push(" WHERE recorded_at >= ");
    qb.push_bind(interval.0);
    qb.push(" AND recorded_at < ");
    qb.push_bind(interval.1);
    if let Some(vehicle) = vehicle_id {
        qb.push(" AND vehicle_id = ");
        qb.push_bind(vehicle.to_owned());
    }
}

/// Predicate over the resolved range, ignoring any module narrowing.
///
/// The module indexer lists hour buckets for the whole range even when a
/// single module is selected for point-level queries.
pub fn push_range_predicate(qb: &mut QueryBuilder<'_, Postgres>, filter: &TimeRangeFilter) {
    push_predicate(qb, (filter.start, filter.end), filter.vehicle_id.as_deref());
}

/// Predicate for point-level queries: the module's hour interval when a
/// module is selected, the full range otherwise.
pub fn push_point_predicate(qb: &mut QueryBuilder<'_, Postgres>, filter: &TimeRangeFilter) {
    push_predicate(qb, filter.point_interval(), filter.vehicle_id.as_deref());
}
