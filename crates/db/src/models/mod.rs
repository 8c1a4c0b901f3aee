//! Row models decoded from aggregate queries.

pub mod ping;

pub use ping::{
    BaseStatsRow, EventRow, HeadingRow, HotspotRow, HourlyActivityRow, HourlyCountRow,
    ModuleRow, PingRow, SamplePointRow, SpeedBandRow, TripRow, VehicleRow,
};
