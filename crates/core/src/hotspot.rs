//! Density-based hotspot clustering over a fixed coordinate grid.
//!
//! Pings are grouped by their coordinates rounded to [`GRID_PRECISION`]
//! decimal degrees (~111 m cell width at 3 decimals). Only cells denser than
//! the minimum threshold survive; survivors are ranked by ping count.

use serde::Serialize;

use crate::types::percent_of;

/// Decimal degrees the grid rounds coordinates to.
pub const GRID_PRECISION: i32 = 3;

/// A cell must hold strictly more pings than this to be retained.
pub const MIN_DENSITY: i64 = 10;

/// Maximum clusters computed per request.
pub const MAX_CLUSTERS: i64 = 20;

/// Clusters the dashboard actually displays.
pub const DISPLAY_CLUSTERS: usize = 6;

/// A raw grid cell aggregate, before ranking.
#[derive(Debug, Clone)]
pub struct CellAggregate {
    /// Rounded cell coordinates (the grid key).
    pub cell_lat: f64,
    pub cell_lng: f64,
    /// Unweighted arithmetic-mean centroid of the member pings.
    pub centroid_lat: f64,
    pub centroid_lng: f64,
    pub count: i64,
    pub avg_speed: Option<f64>,
    pub occupied_count: i64,
}

/// A ranked hotspot cluster.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotCluster {
    pub rank: usize,
    pub cell_key: String,
    pub lat: f64,
    pub lng: f64,
    pub count: i64,
    pub avg_speed: f64,
    pub occupied_count: i64,
    pub occupancy_rate: f64,
}

/// Rank retained cells by descending count and truncate to `cap`.
///
/// Cells are expected to have passed the density threshold already; the
/// re-sort here makes ranking independent of the caller's ordering.
pub fn rank_cells(mut cells: Vec<CellAggregate>, cap: usize) -> Vec<HotspotCluster> {
    cells.sort_by(|a, b| b.count.cmp(&a.count));
    cells
        .into_iter()
        .take(cap)
        .enumerate()
        .map(|(i, cell)| HotspotCluster {
            rank: i + 1,
            cell_key: format!("{:.3},{:.3}", cell.cell_lat, cell.cell_lng),
            lat: cell.centroid_lat,
            lng: cell.centroid_lng,
            count: cell.count,
            avg_speed: cell.avg_speed.unwrap_or(0.0).round(),
            occupied_count: cell.occupied_count,
            occupancy_rate: percent_of(cell.occupied_count, cell.count),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(count: i64, occupied: i64) -> CellAggregate {
        CellAggregate {
            cell_lat: 36.675,
            cell_lng: 117.001,
            centroid_lat: 36.6753,
            centroid_lng: 117.0012,
            count,
            avg_speed: Some(18.4),
            occupied_count: occupied,
        }
    }

    #[test]
    fn ranks_are_assigned_by_descending_count() {
        let ranked = rank_cells(vec![cell(12, 4), cell(40, 10), cell(25, 5)], 20);
        let counts: Vec<i64> = ranked.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![40, 25, 12]);
        let ranks: Vec<usize> = ranked.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn cap_truncates_the_tail() {
        let cells: Vec<CellAggregate> = (0..30).map(|i| cell(11 + i, 1)).collect();
        let ranked = rank_cells(cells, 20);
        assert_eq!(ranked.len(), 20);
        assert_eq!(ranked[0].count, 40);
    }

    #[test]
    fn cluster_carries_centroid_not_cell_corner() {
        let ranked = rank_cells(vec![cell(11, 11)], 20);
        assert_eq!(ranked[0].lat, 36.6753);
        assert_eq!(ranked[0].lng, 117.0012);
        assert_eq!(ranked[0].cell_key, "36.675,117.001");
        assert_eq!(ranked[0].occupancy_rate, 100.0);
        assert_eq!(ranked[0].avg_speed, 18.0);
    }
}
