use tracing::debug;

use super::error::LocationError;
use super::resolve::{resolve_bbox_centroid, resolve_point};
use crate::models::{NormalizedLocation, RawRecord};

/// Outcome of normalizing one batch: resolved locations and dropped records
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub locations: Vec<NormalizedLocation>,
    pub failures: Vec<LocationError>,
}

impl NormalizedBatch {
    /// Number of input records this batch accounts for
    pub fn len_in(&self) -> usize {
        self.locations.len() + self.failures.len()
    }

    fn absorb(&mut self, results: impl IntoIterator<Item = Result<NormalizedLocation, LocationError>>) {
        for result in results {
            match result {
                Ok(loc) => self.locations.push(loc),
                Err(e) => self.failures.push(e),
            }
        }
    }
}

fn has_point_text(record: &RawRecord) -> bool {
    record.coordinates.is_some()
}

/// Resolve one record by whichever text field it is routed on.
///
/// Point text wins whenever present; otherwise the bounding box is used,
/// even if it is absent too.
pub fn resolve_record(record: RawRecord) -> Result<NormalizedLocation, LocationError> {
    if has_point_text(&record) {
        resolve_point(record)
    } else {
        resolve_bbox_centroid(record)
    }
}

/// Normalize a whole batch.
///
/// Records are split into a bounding-box group and a point group, each
/// resolved in input order, and the centroid results come first. Failing
/// records are collected rather than aborting the batch.
pub fn normalize(records: Vec<RawRecord>) -> NormalizedBatch {
    let (points, boxes): (Vec<RawRecord>, Vec<RawRecord>) = records
        .into_iter()
        .partition(has_point_text);

    debug!(
        "Normalizing {} point records and {} bounding-box records",
        points.len(),
        boxes.len()
    );

    let mut batch = NormalizedBatch::default();
    batch.absorb(boxes.into_iter().map(resolve_record));
    batch.absorb(points.into_iter().map(resolve_record));
    batch
}
