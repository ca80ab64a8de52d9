use geo_types::{coord, Coord, Point};

use super::error::LocationError;
use super::extract::extract;
use crate::models::{LocationField, LocationKind, NormalizedLocation, RawRecord};

/// The eight numbers of a bounding box, as four `(lon, lat)` corners in the
/// order bottom-left, top-left, top-right, bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerSet([f64; 8]);

impl CornerSet {
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        let values: [f64; 8] = values.try_into().ok()?;
        Some(Self(values))
    }

    fn corner(&self, i: usize) -> Coord<f64> {
        coord! { x: self.0[2 * i], y: self.0[2 * i + 1] }
    }

    pub fn bottom_left(&self) -> Coord<f64> {
        self.corner(0)
    }

    pub fn top_left(&self) -> Coord<f64> {
        self.corner(1)
    }

    pub fn top_right(&self) -> Coord<f64> {
        self.corner(2)
    }

    pub fn bottom_right(&self) -> Coord<f64> {
        self.corner(3)
    }

    /// Midpoint of the bottom-left/top-right diagonal.
    ///
    /// Assumes an axis-aligned box, so the other two corners are not used.
    pub fn centroid(&self) -> Point<f64> {
        let bl = self.bottom_left();
        let tr = self.top_right();
        Point::new((bl.x + tr.x) / 2.0, (bl.y + tr.y) / 2.0)
    }
}

/// Extract exactly `expected` numbers from one of the record's text fields
fn extract_exact(
    id: &str,
    field: LocationField,
    text: Option<&str>,
    expected: usize,
) -> Result<Vec<f64>, LocationError> {
    let text = text.ok_or_else(|| LocationError::Missing {
        id: id.to_string(),
        field,
    })?;

    let values = extract(text).map_err(|e| LocationError::Parse {
        id: id.to_string(),
        field,
        reason: e.to_string(),
    })?;

    if values.is_empty() {
        return Err(LocationError::Parse {
            id: id.to_string(),
            field,
            reason: "no decimal numbers found".to_string(),
        });
    }
    if values.len() != expected {
        return Err(LocationError::Malformed {
            id: id.to_string(),
            field,
            expected,
            found: values.len(),
        });
    }
    Ok(values)
}

/// Resolve a record from its point-coordinate text.
///
/// The first number becomes the longitude and the second the latitude,
/// whatever the text looks like.
pub fn resolve_point(record: RawRecord) -> Result<NormalizedLocation, LocationError> {
    let values = extract_exact(
        &record.id,
        LocationField::Coordinates,
        record.coordinates.as_deref(),
        2,
    )?;
    let position = Point::new(values[0], values[1]);
    Ok(NormalizedLocation::from_record(
        record,
        position,
        LocationKind::Point,
    ))
}

/// Resolve a record to the centroid of its bounding-box text
pub fn resolve_bbox_centroid(record: RawRecord) -> Result<NormalizedLocation, LocationError> {
    let values = extract_exact(&record.id, LocationField::Bbox, record.bbox.as_deref(), 8)?;
    let corners = CornerSet::from_slice(&values).ok_or_else(|| LocationError::Malformed {
        id: record.id.clone(),
        field: LocationField::Bbox,
        expected: 8,
        found: values.len(),
    })?;
    Ok(NormalizedLocation::from_record(
        record,
        corners.centroid(),
        LocationKind::Centroid,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::FailureKind;

    const UNIT_BOX: &str = "[[[-1.0, -1.0], [-1.0, 1.0], [1.0, 1.0], [1.0, -1.0]]]";

    #[test]
    fn test_point_keeps_positional_order() {
        let record = RawRecord::new("1", "t").with_coordinates("40.7128,-74.0060");
        let loc = resolve_point(record).unwrap();
        assert_eq!(loc.kind, LocationKind::Point);
        assert_eq!(loc.longitude(), 40.7128);
        assert_eq!(loc.latitude(), -74.0060);
    }

    #[test]
    fn test_point_single_number_is_malformed() {
        let record = RawRecord::new("2", "t").with_coordinates("[40.7128]");
        let err = resolve_point(record).unwrap_err();
        assert_eq!(
            err,
            LocationError::Malformed {
                id: "2".into(),
                field: LocationField::Coordinates,
                expected: 2,
                found: 1,
            }
        );
        assert_eq!(err.kind(), FailureKind::MalformedLocation);
    }

    #[test]
    fn test_point_too_many_numbers_is_malformed() {
        let record = RawRecord::new("2b", "t").with_coordinates("[40.7128, -74.0060, 10.5]");
        assert!(matches!(
            resolve_point(record),
            Err(LocationError::Malformed { found: 3, expected: 2, .. })
        ));
    }

    #[test]
    fn test_point_without_numbers_is_parse_error() {
        let record = RawRecord::new("3", "t").with_coordinates("unknown");
        let err = resolve_point(record).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Parse);
        assert_eq!(err.record_id(), "3");
    }

    #[test]
    fn test_unit_box_centroid() {
        let record = RawRecord::new("4", "t").with_bbox(UNIT_BOX);
        let loc = resolve_bbox_centroid(record).unwrap();
        assert_eq!(loc.kind, LocationKind::Centroid);
        assert_eq!(loc.longitude(), 0.0);
        assert_eq!(loc.latitude(), 0.0);
    }

    #[test]
    fn test_centroid_uses_diagonal_only() {
        // top-left and bottom-right are deliberately off; only the diagonal counts
        let text = "[[[10.0, 20.0], [99.0, 99.0], [12.0, 24.0], [-99.0, -99.0]]]";
        let loc = resolve_bbox_centroid(RawRecord::new("5", "t").with_bbox(text)).unwrap();
        assert_eq!(loc.longitude(), 11.0);
        assert_eq!(loc.latitude(), 22.0);
    }

    #[test]
    fn test_corner_order() {
        let values = extract(UNIT_BOX).unwrap();
        let corners = CornerSet::from_slice(&values).unwrap();
        assert_eq!(corners.bottom_left(), coord! { x: -1.0, y: -1.0 });
        assert_eq!(corners.top_left(), coord! { x: -1.0, y: 1.0 });
        assert_eq!(corners.top_right(), coord! { x: 1.0, y: 1.0 });
        assert_eq!(corners.bottom_right(), coord! { x: 1.0, y: -1.0 });
    }

    #[test]
    fn test_bbox_wrong_count() {
        let record = RawRecord::new("6", "t").with_bbox("[[1.0, 2.0], [3.0, 4.0]]");
        assert!(matches!(
            resolve_bbox_centroid(record),
            Err(LocationError::Malformed { found: 4, expected: 8, .. })
        ));
    }

    #[test]
    fn test_bbox_too_many_numbers() {
        let text = "[[[-1.0, -1.0], [-1.0, 1.0], [1.0, 1.0], [1.0, -1.0], [0.5, 0.5]]]";
        let record = RawRecord::new("6b", "t").with_bbox(text);
        assert!(matches!(
            resolve_bbox_centroid(record),
            Err(LocationError::Malformed { found: 10, expected: 8, .. })
        ));
    }

    #[test]
    fn test_bbox_missing_text() {
        let record = RawRecord::new("7", "t");
        assert_eq!(
            resolve_bbox_centroid(record).unwrap_err(),
            LocationError::Missing {
                id: "7".into(),
                field: LocationField::Bbox
            }
        );
    }
}
