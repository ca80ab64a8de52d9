//! Geoclip - clip geotagged records to a rectangular region
//!
//! This library provides the location normalization and spatial filter
//! used by the `clip` binary.

pub mod config;
pub mod locate;
pub mod models;
pub mod pipeline;
pub mod spatial;
pub mod tabular;

pub use models::{LocationKind, NormalizedLocation, RawRecord, Region};
