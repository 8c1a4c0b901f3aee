//! Shared domain types for GPS ping analytics.

use serde::{Deserialize, Serialize};

/// Classification of a single GPS ping within a vehicle's operating cycle.
///
/// Stored as a `SMALLINT` in the ping table; `0` (or anything unknown) means
/// the ping carries no event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTag {
    None,
    Pickup,
    Dropoff,
    OccupiedOngoing,
    EmptyOngoing,
}

impl EventTag {
    /// Decode the wire/storage representation.
    pub fn from_i16(value: i16) -> Self {
        match value {
            1 => Self::Pickup,
            2 => Self::Dropoff,
            3 => Self::OccupiedOngoing,
            4 => Self::EmptyOngoing,
            _ => Self::None,
        }
    }

    /// Storage representation (`0` for [`EventTag::None`]).
    pub fn as_i16(self) -> i16 {
        match self {
            Self::None => 0,
            Self::Pickup => 1,
            Self::Dropoff => 2,
            Self::OccupiedOngoing => 3,
            Self::EmptyOngoing => 4,
        }
    }

    /// Human-readable label for dashboards.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "No event",
            Self::Pickup => "Pickup",
            Self::Dropoff => "Dropoff",
            Self::OccupiedOngoing => "Occupied (ongoing)",
            Self::EmptyOngoing => "Empty (ongoing)",
        }
    }

    /// Whether this tag marks a passenger boarding or alighting moment.
    pub fn is_passenger_exchange(self) -> bool {
        matches!(self, Self::Pickup | Self::Dropoff)
    }
}

/// Clamp a percentage to the `[0, 100]` range.
///
/// Aggregates derive rates from counts that are non-negative by
/// construction, but rounding and degenerate inputs (zero denominators
/// handled upstream) still go through this single choke point.
pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Percentage of `part` in `total`, rounded to a whole number and clamped.
///
/// Returns `0.0` when `total` is zero.
pub fn percent_of(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    clamp_percent((part as f64 / total as f64 * 100.0).round())
}
