//! Location normalization.
//!
//! Turns the free-text `coordinates` / `bbox` fields of raw records into a
//! single `(longitude, latitude)` position per record.

mod error;
mod extract;
mod normalize;
mod resolve;

pub use error::{FailureKind, LocationError};
pub use extract::{extract, InvalidNumber, COORD_PATTERN};
pub use normalize::{normalize, resolve_record, NormalizedBatch};
pub use resolve::{resolve_bbox_centroid, resolve_point, CornerSet};
