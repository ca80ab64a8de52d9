//! Rectangular filter region.

use geo_types::{coord, Coord, Point};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RegionError {
    #[error("region bound {0} is not a finite number")]
    NonFinite(&'static str),
    #[error("region is degenerate: lower-left ({min_lon}, {min_lat}) must lie strictly below and left of upper-right ({max_lon}, {max_lat})")]
    Degenerate {
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    },
}

/// Axis-aligned rectangle given by its lower-left and upper-right corners.
///
/// The corners are kept exactly as supplied; ordering is checked by
/// [`Region::validate`], never silently swapped.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "RegionBounds")]
pub struct Region {
    pub lower_left: Coord<f64>,
    pub upper_right: Coord<f64>,
}

/// Serialized form: `{ min_lon, min_lat, max_lon, max_lat }`
#[derive(Debug, Deserialize)]
struct RegionBounds {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl From<RegionBounds> for Region {
    fn from(b: RegionBounds) -> Self {
        Region::new(b.min_lon, b.min_lat, b.max_lon, b.max_lat)
    }
}

impl Region {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            lower_left: coord! { x: min_lon, y: min_lat },
            upper_right: coord! { x: max_lon, y: max_lat },
        }
    }

    pub fn min_lon(&self) -> f64 {
        self.lower_left.x
    }

    pub fn min_lat(&self) -> f64 {
        self.lower_left.y
    }

    pub fn max_lon(&self) -> f64 {
        self.upper_right.x
    }

    pub fn max_lat(&self) -> f64 {
        self.upper_right.y
    }

    /// Open-rectangle membership: a point on any edge is outside.
    pub fn contains(&self, point: &Point<f64>) -> bool {
        self.min_lon() < point.x()
            && point.x() < self.max_lon()
            && self.min_lat() < point.y()
            && point.y() < self.max_lat()
    }

    /// Check that the region is a finite, non-degenerate rectangle
    pub fn validate(&self) -> Result<(), RegionError> {
        let bounds = [
            ("min_lon", self.min_lon()),
            ("min_lat", self.min_lat()),
            ("max_lon", self.max_lon()),
            ("max_lat", self.max_lat()),
        ];
        if let Some((name, _)) = bounds.iter().find(|(_, v)| !v.is_finite()) {
            return Err(RegionError::NonFinite(name));
        }

        if self.min_lon() >= self.max_lon() || self.min_lat() >= self.max_lat() {
            return Err(RegionError::Degenerate {
                min_lon: self.min_lon(),
                min_lat: self.min_lat(),
                max_lon: self.max_lon(),
                max_lat: self.max_lat(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(({}, {}), ({}, {}))",
            self.min_lon(),
            self.min_lat(),
            self.max_lon(),
            self.max_lat()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_interior() {
        let region = Region::new(-75.0, 40.0, -73.0, 41.0);
        assert!(region.contains(&Point::new(-74.0, 40.5)));
        assert!(!region.contains(&Point::new(-76.0, 40.5)));
        assert!(!region.contains(&Point::new(-74.0, 41.5)));
    }

    #[test]
    fn test_edges_excluded() {
        let region = Region::new(-75.0, 40.0, -73.0, 41.0);
        assert!(!region.contains(&Point::new(-75.0, 40.5)));
        assert!(!region.contains(&Point::new(-73.0, 40.5)));
        assert!(!region.contains(&Point::new(-74.0, 40.0)));
        assert!(!region.contains(&Point::new(-74.0, 41.0)));
        assert!(!region.contains(&Point::new(-75.0, 40.0)));
    }

    #[test]
    fn test_validate() {
        assert!(Region::new(-75.0, 40.0, -73.0, 41.0).validate().is_ok());
        assert!(matches!(
            Region::new(-73.0, 40.0, -75.0, 41.0).validate(),
            Err(RegionError::Degenerate { .. })
        ));
        assert!(matches!(
            Region::new(0.0, 1.0, 1.0, 1.0).validate(),
            Err(RegionError::Degenerate { .. })
        ));
        assert_eq!(
            Region::new(f64::NAN, 0.0, 1.0, 1.0).validate(),
            Err(RegionError::NonFinite("min_lon"))
        );
    }

    #[test]
    fn test_deserialize_bounds() {
        let region: Region =
            toml::from_str("min_lon = -75.0\nmin_lat = 40.0\nmax_lon = -73.0\nmax_lat = 41.0")
                .unwrap();
        assert_eq!(region, Region::new(-75.0, 40.0, -73.0, 41.0));
    }
}
