//! Contours: ordered point sequences from a plane cut.

use footslice_math::{Point2, Point3};

use crate::plane::{Plane, PlaneBasis};

/// A contour in 3D, as returned by a cross-section solver.
///
/// Points lie on the cutting plane in traversal order. `closed` records
/// whether the solver found the loop closed; nothing here enforces it, and
/// no winding direction is implied.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour3 {
    /// Points in order.
    pub points: Vec<Point3>,
    /// Whether the last point connects back to the first.
    pub closed: bool,
}

impl Contour3 {
    /// Create a contour.
    pub fn new(points: Vec<Point3>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the contour has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Project into a plane frame, keeping point order.
    pub fn project(&self, plane: &Plane, basis: &PlaneBasis) -> Contour2 {
        let origin = plane.origin_point();
        Contour2 {
            points: self
                .points
                .iter()
                .map(|p| basis.project(&origin, p))
                .collect(),
            closed: self.closed,
        }
    }
}

/// A contour in plane-local 2D coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour2 {
    /// Points in order.
    pub points: Vec<Point2>,
    /// Whether the last point connects back to the first.
    pub closed: bool,
}

impl Contour2 {
    /// Create a contour.
    pub fn new(points: Vec<Point2>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the contour has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area of the polygon through the points.
    /// Positive for counter-clockwise, negative for clockwise.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.points[i].x * self.points[j].y;
            area -= self.points[j].x * self.points[i].y;
        }
        area / 2.0
    }

    /// Path length, including the closing edge for closed contours.
    pub fn perimeter(&self) -> f64 {
        let mut length: f64 = self
            .points
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum();
        if self.closed && self.points.len() > 2 {
            if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
                length += (first - last).norm();
            }
        }
        length
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> Option<(Point2, Point2)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(min, max), p| (min.inf(p), max.sup(p))),
        )
    }
}
