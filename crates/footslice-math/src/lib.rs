#![warn(missing_docs)]

//! Math types for footslice.
//!
//! Thin wrappers around nalgebra providing the point and vector types used
//! by the slicing pipeline, a 2D affine transform for placing projected
//! contours on a drawing, and tolerance constants.
//!
//! All lengths are in meters unless a type says otherwise.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A point in a 2D plane-local or drawing frame.
pub type Point2 = nalgebra::Point2<f64>;

/// A 2D affine transform stored as a 3x3 homogeneous matrix.
///
/// Projection into a plane basis never scales; anything that converts
/// plane-local meters into another frame goes through one of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    /// The underlying 3x3 matrix.
    pub matrix: Matrix3<f64>,
}

impl Transform2 {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Translation by `(dx, dy)`.
    pub fn translation(dx: f64, dy: f64) -> Self {
        let mut m = Matrix3::identity();
        m[(0, 2)] = dx;
        m[(1, 2)] = dy;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy)`.
    pub fn scale(sx: f64, sy: f64) -> Self {
        let mut m = Matrix3::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        Self { matrix: m }
    }

    /// Uniform scale by `s`.
    pub fn uniform_scale(s: f64) -> Self {
        Self::scale(s, s)
    }

    /// Compose: `self * other`, so `other` is applied first.
    pub fn then(&self, other: &Transform2) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// True when this is exactly the identity matrix.
    pub fn is_identity(&self) -> bool {
        self.matrix == Matrix3::identity()
    }

    /// The `[a, b, c, d, e, f]` coefficients of the SVG `matrix(...)` form.
    pub fn to_svg_coefficients(&self) -> [f64; 6] {
        let m = &self.matrix;
        [
            m[(0, 0)],
            m[(1, 0)],
            m[(0, 1)],
            m[(1, 1)],
            m[(0, 2)],
            m[(1, 2)],
        ]
    }
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Serializable description of a placement transform: scale then translate.
///
/// This is the shape settings files use; [`Placement::to_transform`] turns
/// it into a [`Transform2`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    /// Scale factor applied to both axes.
    pub scale: f64,
    /// Translation applied after scaling, in the target frame's units.
    pub translate: [f64; 2],
}

impl Placement {
    /// True when the scale is finite and non-zero and the translation is
    /// finite, so the matrix form is invertible and printable.
    pub fn is_valid(&self) -> bool {
        self.scale.is_finite()
            && self.scale != 0.0
            && self.translate.iter().all(|t| t.is_finite())
    }

    /// Build the matrix form.
    pub fn to_transform(&self) -> Transform2 {
        Transform2::translation(self.translate[0], self.translate[1])
            .then(&Transform2::uniform_scale(self.scale))
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: [0.0, 0.0],
        }
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in meters.
    pub linear: f64,
    /// Threshold below which a vector component counts as zero.
    pub component: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 m linear, 1e-9 component).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        component: 1e-9,
    };

    /// Check if a vector component is effectively zero.
    pub fn component_is_zero(&self, c: f64) -> bool {
        c.abs() < self.component
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
