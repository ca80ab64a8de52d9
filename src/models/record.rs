//! Input rows and the uniform location records derived from them.

use geo_types::Point;

/// Which of the two location encodings a record was resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    /// Taken directly from the point-coordinate text
    Point,
    /// Derived from the bounding-box text
    Centroid,
}

impl std::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationKind::Point => write!(f, "point"),
            LocationKind::Centroid => write!(f, "centroid"),
        }
    }
}

/// Location text field of a raw record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    Coordinates,
    Bbox,
}

impl std::fmt::Display for LocationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationField::Coordinates => write!(f, "coordinates"),
            LocationField::Bbox => write!(f, "bbox"),
        }
    }
}

/// One input row as read from a `|`-separated part file.
///
/// A well-formed record carries exactly one of `coordinates` / `bbox`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Unique record key
    pub id: String,
    pub timestamp: String,
    /// Point-coordinate text, e.g. `[-122.4194, 37.7749]`
    pub coordinates: Option<String>,
    /// Four-corner bounding-box text
    pub bbox: Option<String>,
    /// Any trailing columns, carried through untouched
    pub extra: Vec<String>,
}

impl RawRecord {
    pub fn new(id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
            coordinates: None,
            bbox: None,
            extra: Vec::new(),
        }
    }

    pub fn with_coordinates(mut self, text: impl Into<String>) -> Self {
        self.coordinates = Some(text.into());
        self
    }

    pub fn with_bbox(mut self, text: impl Into<String>) -> Self {
        self.bbox = Some(text.into());
        self
    }
}

/// A record reduced to a single `(longitude, latitude)` position.
///
/// Replaces its [`RawRecord`] for everything downstream; the two raw
/// location fields are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLocation {
    pub id: String,
    pub timestamp: String,
    pub extra: Vec<String>,
    /// x = longitude, y = latitude
    pub position: Point<f64>,
    pub kind: LocationKind,
}

impl NormalizedLocation {
    /// Build from the record's identity and passthrough fields
    pub fn from_record(record: RawRecord, position: Point<f64>, kind: LocationKind) -> Self {
        Self {
            id: record.id,
            timestamp: record.timestamp,
            extra: record.extra,
            position,
            kind,
        }
    }

    pub fn longitude(&self) -> f64 {
        self.position.x()
    }

    pub fn latitude(&self) -> f64 {
        self.position.y()
    }
}
