//! Multi-layer slicing: cut a mesh at stepped offsets along one normal.

use footslice_math::{Point3, Vec3};
use footslice_mesh::Mesh;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::contour::{Contour2, Contour3};
use crate::error::{Result, SectionError};
use crate::plane::{Plane, PlaneBasis};
use crate::solver::CrossSectionSolver;

/// Most offsets [`offsets_between`] will generate.
pub const MAX_OFFSETS: usize = 100_000;

/// One offset's slicing result.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Position in the requested offset list (0 = first, drawn first).
    pub index: usize,
    /// Signed distance of the plane from the reference point.
    pub offset: f64,
    /// The cutting plane.
    pub plane: Plane,
    /// Contours in solver order. Empty when the plane missed the mesh or the
    /// solver failed for this offset.
    pub contours: Vec<Contour3>,
}

impl Layer {
    /// Check if the layer is empty (no contours).
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Get the number of contours.
    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    /// The frame this layer projects into.
    pub fn basis(&self) -> Result<PlaneBasis> {
        self.plane.basis()
    }

    /// Project every contour into `basis`.
    pub fn project(&self, basis: &PlaneBasis) -> Vec<Contour2> {
        self.contours
            .iter()
            .map(|c| c.project(&self.plane, basis))
            .collect()
    }
}

/// Where and how often to cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackParams {
    /// Point the offsets are measured from.
    pub reference: [f64; 3],
    /// Cutting direction shared by every layer.
    pub normal: [f64; 3],
    /// Signed distances along the normal, in draw order.
    pub offsets: Vec<f64>,
}

impl StackParams {
    /// Cut along `normal` through `reference` at each offset.
    pub fn new(reference: Point3, normal: Vec3, offsets: Vec<f64>) -> Self {
        Self {
            reference: [reference.x, reference.y, reference.z],
            normal: [normal.x, normal.y, normal.z],
            offsets,
        }
    }

    /// Horizontal cuts at the given heights above the world origin.
    pub fn horizontal(offsets: Vec<f64>) -> Self {
        Self::new(Point3::origin(), Vec3::z(), offsets)
    }

    /// Reference point.
    pub fn reference_point(&self) -> Point3 {
        Point3::from(self.reference)
    }

    /// Normal vector.
    pub fn normal_vec(&self) -> Vec3 {
        Vec3::from(self.normal)
    }
}

impl Default for StackParams {
    fn default() -> Self {
        Self::horizontal(vec![0.01, 0.02, 0.03])
    }
}

/// Slice `mesh` at every offset in `params`.
///
/// Layers come back in the order the offsets were given, whatever order the
/// solver calls finish in. A solver failure at one offset produces an empty
/// layer instead of aborting the stack. A zero normal, a non-finite offset,
/// or a face that references a missing vertex fails the whole call.
#[instrument(skip(mesh, solver), fields(layers = params.offsets.len()))]
pub fn slice_stack<S>(mesh: &Mesh, params: &StackParams, solver: &S) -> Result<Vec<Layer>>
where
    S: CrossSectionSolver + ?Sized,
{
    let normal = params.normal_vec();
    // Fail fast on a bad normal; the basis is what every layer projects with
    PlaneBasis::new(&normal)?;
    if let Some(bad) = params.offsets.iter().find(|o| !o.is_finite()) {
        return Err(SectionError::InvalidOffsets(format!(
            "offset {bad} is not finite"
        )));
    }
    mesh.validate()?;

    let reference = params.reference_point();
    let planes = params
        .offsets
        .iter()
        .map(|&offset| Plane::at_offset(reference, normal, offset))
        .collect::<Result<Vec<_>>>()?;

    let layers: Vec<Layer> = planes
        .into_par_iter()
        .zip(params.offsets.par_iter())
        .enumerate()
        .map(|(index, (plane, &offset))| {
            let contours = match solver.solve(mesh, &plane) {
                Ok(contours) => contours,
                Err(err) => {
                    warn!(index, offset, error = %err, "solver failed, keeping empty layer");
                    Vec::new()
                }
            };
            debug!(index, offset, contours = contours.len(), "layer sliced");
            Layer {
                index,
                offset,
                plane,
                contours,
            }
        })
        .collect();

    let non_empty = layers.iter().filter(|l| !l.is_empty()).count();
    info!(
        layers = layers.len(),
        non_empty,
        contours = layers.iter().map(Layer::contour_count).sum::<usize>(),
        "slice stack complete"
    );
    Ok(layers)
}

/// Offsets from `start` (inclusive) to `stop` (exclusive) every `step`.
///
/// Each offset is computed as `start + i * step` so rounding does not
/// accumulate across layers. A range needing more than [`MAX_OFFSETS`]
/// steps is rejected.
pub fn offsets_between(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    let finite = start.is_finite() && stop.is_finite() && step.is_finite();
    if !finite || step <= 0.0 {
        return Err(SectionError::InvalidOffsets(format!(
            "cannot step from {start} to {stop} by {step}"
        )));
    }
    if stop <= start {
        return Ok(Vec::new());
    }
    let count = ((stop - start) / step).ceil();
    if !count.is_finite() || count > MAX_OFFSETS as f64 {
        return Err(SectionError::InvalidOffsets(format!(
            "stepping from {start} to {stop} by {step} exceeds {MAX_OFFSETS} offsets"
        )));
    }
    let count = count as usize;
    Ok((0..count)
        .map(|i| (i as f64).mul_add(step, start))
        .filter(|&o| o < stop)
        .collect())
}

/// Offsets every `step` through the mesh's extent along `normal`.
///
/// The first cut sits half a step above the lowest vertex, the way a
/// slicer centres each layer in its band. Offsets are measured from
/// `reference`. An empty mesh yields no offsets.
pub fn offsets_spanning(
    mesh: &Mesh,
    reference: Point3,
    normal: Vec3,
    step: f64,
) -> Result<Vec<f64>> {
    let n = Plane::new(reference, normal).unit_normal()?;
    let Some((lo, hi)) = mesh.extent_along(&n) else {
        return Ok(Vec::new());
    };
    let base = reference.coords.dot(&n);
    offsets_between(lo - base + step / 2.0, hi - base, step)
}
