//! Axis-aligned bounding boxes
//!
//! An empty position set has no box at all, so "empty" is modelled as
//! `Option<BoundingBox>::None` and `None` is the identity for [`BoundingBox::union_all`].
//! NaN coordinates are carried into the box instead of being skipped; callers use
//! [`BoundingBox::has_nan`] to refuse such input.

use crate::point::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned box described by its minimum corner and per-axis size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub size: Vector3d,
}

fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

impl BoundingBox {
    pub fn new(min: Point3d, size: Vector3d) -> Self {
        Self { min, size }
    }

    /// Create a box spanning two corners
    pub fn from_corners(min: Point3d, max: Point3d) -> Self {
        Self {
            min,
            size: max - min,
        }
    }

    /// Compute the bounds of a position set, `None` when the set is empty
    pub fn from_points(points: &[Point3d]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;

        for p in &points[1..] {
            for i in 0..3 {
                min[i] = nan_min(min[i], p[i]);
                max[i] = nan_max(max[i], p[i]);
            }
        }

        Some(Self::from_corners(min, max))
    }

    /// The maximum corner
    pub fn max(&self) -> Point3d {
        self.min + self.size
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let a_max = self.max();
        let b_max = other.max();
        let mut min = self.min;
        let mut max = a_max;
        for i in 0..3 {
            min[i] = nan_min(self.min[i], other.min[i]);
            max[i] = nan_max(a_max[i], b_max[i]);
        }
        Self::from_corners(min, max)
    }

    /// Fold a sequence of possibly-empty boxes; empty operands leave the others unchanged
    pub fn union_all<I>(boxes: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = Option<BoundingBox>>,
    {
        boxes
            .into_iter()
            .flatten()
            .reduce(|acc, b| acc.union(&b))
    }

    /// Largest size across the three axes
    pub fn max_extent(&self) -> f64 {
        nan_max(nan_max(self.size.x, self.size.y), self.size.z)
    }

    /// Length of the box diagonal
    pub fn diagonal(&self) -> f64 {
        self.size.norm()
    }

    /// True when any size component is NaN
    pub fn has_nan(&self) -> bool {
        self.size.iter().any(|s| s.is_nan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_points() {
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_single_point_has_zero_size() {
        let b = BoundingBox::from_points(&[Point3d::new(1.0, -2.0, 3.0)]).unwrap();
        assert_eq!(b.min, Point3d::new(1.0, -2.0, 3.0));
        assert_eq!(b.size, Vector3d::zeros());
        assert_eq!(b.max_extent(), 0.0);
    }

    #[test]
    fn test_from_points() {
        let b = BoundingBox::from_points(&[
            Point3d::new(1.0, 5.0, -1.0),
            Point3d::new(-2.0, 0.0, 4.0),
            Point3d::new(0.0, 2.0, 0.0),
        ])
        .unwrap();
        assert_eq!(b.min, Point3d::new(-2.0, 0.0, -1.0));
        assert_eq!(b.max(), Point3d::new(1.0, 5.0, 4.0));
        assert_relative_eq!(b.max_extent(), 5.0);
        assert!(!b.has_nan());
    }

    #[test]
    fn test_nan_propagates() {
        let b = BoundingBox::from_points(&[
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(f64::NAN, 1.0, 1.0),
        ])
        .unwrap();
        assert!(b.has_nan());
        assert!(b.size.x.is_nan());
        assert!(!b.size.y.is_nan());
    }

    #[test]
    fn test_union() {
        let a = BoundingBox::new(Point3d::new(0.0, 0.0, 0.0), Vector3d::new(1.0, 1.0, 1.0));
        let b = BoundingBox::new(Point3d::new(-1.0, 0.5, 2.0), Vector3d::new(1.0, 1.0, 1.0));
        let u = a.union(&b);
        assert_eq!(u.min, Point3d::new(-1.0, 0.0, 0.0));
        assert_eq!(u.max(), Point3d::new(1.0, 1.5, 3.0));
    }

    #[test]
    fn test_union_all_skips_empty() {
        let a = BoundingBox::new(Point3d::new(0.0, 0.0, 0.0), Vector3d::new(2.0, 3.0, 4.0));
        assert_eq!(BoundingBox::union_all([None, Some(a), None]), Some(a));
        assert_eq!(BoundingBox::union_all(Vec::new()), None);
        assert_eq!(BoundingBox::union_all([None, None]), None);
    }
}
