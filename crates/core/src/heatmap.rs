//! Heatmap intensity weighting.
//!
//! Each GPS ping rendered on the heatmap carries a multiplicative weight:
//! occupied vehicles, very fast or very slow movement, and passenger
//! pickup/dropoff moments all make a point "hotter". The factors compose by
//! multiplication, so application order is irrelevant.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::time_range::ModuleKey;
use crate::types::EventTag;

/// Weighting factors for heatmap points.
///
/// With the default factors the maximum possible weight is
/// 1 × 2.0 × 1.5 × 2.5 = 7.5. `cap`, when set, clamps the final weight so a
/// handful of heavily-weighted points cannot dominate the rendered gradient.
#[derive(Debug, Clone)]
pub struct WeightConfig {
    /// Multiplier applied when the vehicle carries a passenger.
    pub occupied_factor: f64,
    /// Speed above which a ping counts as fast traffic (km/h).
    pub fast_threshold: f64,
    pub fast_factor: f64,
    /// Speed below which a ping counts as stopped/crawling (km/h).
    pub slow_threshold: f64,
    pub slow_factor: f64,
    /// Multiplier for pickup/dropoff events.
    pub exchange_factor: f64,
    /// Optional ceiling on the final weight.
    pub cap: Option<f64>,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            occupied_factor: 2.0,
            fast_threshold: 30.0,
            fast_factor: 1.5,
            slow_threshold: 5.0,
            slow_factor: 1.2,
            exchange_factor: 2.5,
            cap: None,
        }
    }
}

impl WeightConfig {
    /// Weight for a single ping. Pure in (occupied, speed, event).
    pub fn weight(&self, occupied: bool, speed_kmh: f64, event: EventTag) -> f64 {
        let mut w = 1.0;
        if occupied {
            w *= self.occupied_factor;
        }
        if speed_kmh > self.fast_threshold {
            w *= self.fast_factor;
        } else if speed_kmh < self.slow_threshold {
            w *= self.slow_factor;
        }
        if event.is_passenger_exchange() {
            w *= self.exchange_factor;
        }
        match self.cap {
            Some(cap) => w.min(cap),
            None => w,
        }
    }
}

/// A single weighted point, computed on read and never stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapPoint {
    pub lng: f64,
    pub lat: f64,
    pub weight: f64,
    pub speed: f64,
    pub occupied: bool,
    pub event_tag: EventTag,
    pub time: NaiveDateTime,
    pub module_key: String,
}

impl HeatmapPoint {
    /// Build a point from raw ping fields, assigning its weight and the
    /// key of the hour module it falls into.
    pub fn from_ping(
        config: &WeightConfig,
        lng: f64,
        lat: f64,
        speed_kmh: f64,
        occupied: bool,
        event: EventTag,
        time: NaiveDateTime,
    ) -> Self {
        Self {
            lng,
            lat,
            weight: config.weight(occupied, speed_kmh, event),
            speed: speed_kmh,
            occupied,
            event_tag: event,
            time,
            module_key: ModuleKey::from_timestamp(time).key(),
        }
    }
}
