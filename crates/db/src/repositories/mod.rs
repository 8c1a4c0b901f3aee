//! Repository layer.
//!
//! A zero-sized struct providing async read-only aggregation methods that
//! accept `&PgPool` as the first argument.

pub mod gps_repo;

pub use gps_repo::GpsRepo;
