//! Cutting planes and their 2D coordinate frames.

use footslice_math::{Point2, Point3, Tolerance, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SectionError};

/// A cutting plane: a point on the plane and a normal direction.
///
/// The normal does not have to be unit length; everything that needs a
/// direction normalizes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// A point on the plane.
    pub origin: [f64; 3],
    /// Plane normal.
    pub normal: [f64; 3],
}

impl Plane {
    /// Create a plane from nalgebra types.
    pub fn new(origin: Point3, normal: Vec3) -> Self {
        Self {
            origin: [origin.x, origin.y, origin.z],
            normal: [normal.x, normal.y, normal.z],
        }
    }

    /// Plane at signed distance `offset` from `reference` along `normal`.
    ///
    /// The stored normal is the normalized direction.
    pub fn at_offset(reference: Point3, normal: Vec3, offset: f64) -> Result<Self> {
        let n = unit_normal(&normal)?;
        Ok(Self::new(reference + n * offset, n))
    }

    /// Horizontal plane at height `z`.
    pub fn horizontal(z: f64) -> Self {
        Self {
            origin: [0.0, 0.0, z],
            normal: [0.0, 0.0, 1.0],
        }
    }

    /// Origin as a point.
    pub fn origin_point(&self) -> Point3 {
        Point3::from(self.origin)
    }

    /// Normal as given.
    pub fn normal_vec(&self) -> Vec3 {
        Vec3::from(self.normal)
    }

    /// Unit normal, or [`SectionError::InvalidPlane`] for a zero normal.
    pub fn unit_normal(&self) -> Result<Vec3> {
        unit_normal(&self.normal_vec())
    }

    /// Signed distance of `p` from the plane along the unit normal.
    pub fn signed_distance(&self, p: &Point3) -> Result<f64> {
        Ok(self.unit_normal()?.dot(&(p - self.origin_point())))
    }

    /// Build the in-plane frame for this plane's normal.
    pub fn basis(&self) -> Result<PlaneBasis> {
        PlaneBasis::new(&self.normal_vec())
    }

    /// Project a 3D point into this plane's frame.
    pub fn project(&self, basis: &PlaneBasis, p: &Point3) -> Point2 {
        basis.project(&self.origin_point(), p)
    }
}

/// An orthonormal frame `(u, v)` spanning a plane with unit normal `n`.
///
/// `u`, `v` and `n` are mutually orthogonal unit vectors with
/// `v = n x u`. The frame depends only on the normal's direction, so planes
/// that share a normal share a frame and their contours stack in register.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneBasis {
    /// First in-plane axis (drawing x).
    pub u: Vec3,
    /// Second in-plane axis (drawing y).
    pub v: Vec3,
    /// Unit normal.
    pub normal: Vec3,
}

impl PlaneBasis {
    /// Construct the frame for `normal`.
    ///
    /// When the normal has no X component the first axis is `+-X`, signed by
    /// the normal's Z (or Y, for normals along Y). Otherwise the first axis
    /// is `(n.y, -n.x, 0)` normalized. Both choices lie in the plane.
    pub fn new(normal: &Vec3) -> Result<Self> {
        let n = unit_normal(normal)?;
        let tol = Tolerance::DEFAULT;

        let candidate = if tol.component_is_zero(n.x) {
            let sign = if tol.component_is_zero(n.z) { n.y } else { n.z };
            Vec3::new(sign.signum(), 0.0, 0.0)
        } else {
            Vec3::new(n.y, -n.x, 0.0)
        };

        let u = candidate.normalize();
        let v = n.cross(&u);
        Ok(Self { u, v, normal: n })
    }

    /// Plane-local coordinates of `p` relative to `origin`.
    ///
    /// Lengths are preserved; no scaling happens here.
    pub fn project(&self, origin: &Point3, p: &Point3) -> Point2 {
        let d = p - origin;
        Point2::new(self.u.dot(&d), self.v.dot(&d))
    }
}

fn unit_normal(normal: &Vec3) -> Result<Vec3> {
    let len = normal.norm();
    if len > 0.0 && len.is_finite() {
        Ok(normal / len)
    } else {
        Err(SectionError::InvalidPlane {
            x: normal.x,
            y: normal.y,
            z: normal.z,
        })
    }
}
