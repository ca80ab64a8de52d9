//! Rectangular spatial filter.

use crate::models::{NormalizedLocation, Region};

/// Keep the locations strictly inside `region`, preserving their order
pub fn filter(locations: Vec<NormalizedLocation>, region: &Region) -> Vec<NormalizedLocation> {
    locations
        .into_iter()
        .filter(|loc| region.contains(&loc.position))
        .collect()
}
