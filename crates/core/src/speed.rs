//! Fixed km/h speed bands for the distribution chart.

use serde::Serialize;

/// Display labels, index-aligned with band ordinals 0..=5. Bands are
/// 10 km/h wide, half-open, with everything at or above 50 folded into
/// the last.
pub const BAND_LABELS: [&str; 6] = [
    "0-10 km/h",
    "10-20 km/h",
    "20-30 km/h",
    "30-40 km/h",
    "40-50 km/h",
    "50+ km/h",
];

/// One speed band with its share of the total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedBand {
    pub range: &'static str,
    pub count: i64,
    pub percentage: f64,
}

/// Build the dense band list from sparse `(ordinal, count)` rows.
///
/// `total` is the record count of the whole range; bands absent from `rows`
/// appear with a zero count so the chart always shows all six bands.
pub fn build_bands(rows: &[(i16, i64)], total: i64) -> Vec<SpeedBand> {
    (0..BAND_LABELS.len())
        .map(|ordinal| {
            let count = rows
                .iter()
                .find(|(o, _)| *o as usize == ordinal)
                .map(|(_, c)| *c)
                .unwrap_or(0);
            SpeedBand {
                range: BAND_LABELS[ordinal],
                count,
                percentage: crate::types::percent_of(count, total),
            }
        })
        .collect()
}
