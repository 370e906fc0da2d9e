use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Point;
use crate::node::Axis;

/// An axis-aligned rectangle used for range queries.
///
/// `BoundingBox` spans the closed region from (min_x, min_y) to
/// (max_x, max_y); points on the boundary are contained.
///
/// # Examples
///
/// ```rust
/// use nearest_kdtree::{BoundingBox, Point};
///
/// let bbox = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
/// assert!(bbox.contains_point(&Point::new(2.0, 1.0)));
/// assert!(!bbox.contains_point(&Point::new(3.0, 0.0)));
/// ```
#[derive(Clone, Copy, PartialEq, Default, Debug, Deserialize, Serialize)]
pub struct BoundingBox {
    /// Minimum X coordinate
    pub min_x: f64,
    /// Minimum Y coordinate
    pub min_y: f64,
    /// Maximum X coordinate
    pub max_x: f64,
    /// Maximum Y coordinate
    pub max_y: f64,
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoundingBox({}, {}, {}, {})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

impl BoundingBox {
    /// Creates a new bounding box with the specified coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Checks if this bounding box contains a point.
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Returns the `(min, max)` extent along an axis.
    pub fn range(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.min_x, self.max_x),
            Axis::Y => (self.min_y, self.max_y),
        }
    }

    /// Checks if the bounding box is valid (min <= max).
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(bbox.min_x, 1.0);
        assert_eq!(bbox.min_y, 2.0);
        assert_eq!(bbox.max_x, 3.0);
        assert_eq!(bbox.max_y, 4.0);
        assert!(bbox.is_valid());
    }

    #[test]
    fn test_contains_point_boundary() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(bbox.contains_point(&Point::new(0.0, 0.0)));
        assert!(bbox.contains_point(&Point::new(10.0, 10.0)));
        assert!(bbox.contains_point(&Point::new(5.0, 10.0)));
        assert!(!bbox.contains_point(&Point::new(10.000_001, 5.0)));
        assert!(!bbox.contains_point(&Point::new(5.0, -0.5)));
    }

    #[test]
    fn test_range() {
        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(bbox.range(Axis::X), (1.0, 3.0));
        assert_eq!(bbox.range(Axis::Y), (2.0, 4.0));
    }

    #[test]
    fn test_invalid() {
        assert!(!BoundingBox::new(3.0, 0.0, 1.0, 1.0).is_valid());
    }

    #[test]
    fn test_display_and_serde() {
        let bbox = BoundingBox::new(0.0, 0.5, 2.0, 2.5);
        assert_eq!(bbox.to_string(), "BoundingBox(0, 0.5, 2, 2.5)");
        let json = serde_json::to_string(&bbox).unwrap();
        let back: BoundingBox = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bbox);
    }
}
