//! Pure domain logic for the GPS spatiotemporal analytics core.
//!
//! No I/O lives here: time-range resolution, heatmap weighting, hour-bucket
//! ("module") keys, hotspot ranking, per-vehicle and per-event aggregation
//! finishing, and the diurnal distribution helpers are all plain functions
//! over plain data, so they can be unit-tested without a database.

pub mod error;
pub mod heatmap;
pub mod hotspot;
pub mod modules;
pub mod passenger;
pub mod speed;
pub mod temporal;
pub mod time_range;
pub mod types;
pub mod vehicle;
