//! Core data models for the location pipeline.

pub mod record;
pub mod region;

pub use record::{LocationField, LocationKind, NormalizedLocation, RawRecord};
pub use region::{Region, RegionError};
