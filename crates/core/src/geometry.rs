//! Core geometry types.
//!
//! Points are plain coordinate pairs. They deliberately do not implement
//! `Eq` or `Hash`: two drawing points are the same node only under the
//! configured closeness tolerance (see [`Tolerance::are_close`]), and that
//! relation is not transitive.
//!
//! [`Tolerance::are_close`]: crate::config::Tolerance::are_close

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Point2D) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared Euclidean distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Returns true if both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the coordinates as an array (used by the spatial index).
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point2D> for (f64, f64) {
    fn from(p: Point2D) -> Self {
        (p.x, p.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds2D {
    /// Creates a bounding box from its corners.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Computes the bounding box of a point set.
    ///
    /// Returns a zero box at the origin for an empty slice.
    pub fn from_points(points: &[Point2D]) -> Self {
        if points.is_empty() {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Self::new(min_x, min_y, max_x, max_y)
    }

    /// Extent along x (reported as piece length).
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along y (reported as piece width).
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance(b), 5.0);
        assert_relative_eq!(a.distance_squared(b), 25.0);
    }

    #[test]
    fn test_bounds_from_points() {
        let pts = vec![
            Point2D::new(10.0, 20.0),
            Point2D::new(50.0, 20.0),
            Point2D::new(50.0, 80.0),
            Point2D::new(10.0, 80.0),
        ];
        let b = Bounds2D::from_points(&pts);
        assert_relative_eq!(b.min_x, 10.0);
        assert_relative_eq!(b.max_y, 80.0);
        assert_relative_eq!(b.width(), 40.0);
        assert_relative_eq!(b.height(), 60.0);
    }

    #[test]
    fn test_bounds_empty() {
        let b = Bounds2D::from_points(&[]);
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), 0.0);
    }

    #[test]
    fn test_non_finite() {
        assert!(Point2D::new(1.0, 2.0).is_finite());
        assert!(!Point2D::new(f64::NAN, 2.0).is_finite());
    }
}
