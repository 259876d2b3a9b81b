//! Diagnostic reports on meshes and slice stacks.

use footslice_mesh::Mesh;
use footslice_section::{Layer, PlaneBasis};
use serde::Serialize;

/// Counts and extent of a mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshSummary {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of faces as read.
    pub faces: usize,
    /// Minimum corner, if the mesh has positioned vertices.
    pub min: Option<[f64; 3]>,
    /// Maximum corner.
    pub max: Option<[f64; 3]>,
}

impl MeshSummary {
    /// Summarize `mesh`.
    pub fn of(mesh: &Mesh) -> Self {
        let bounds = mesh.bounds();
        Self {
            vertices: mesh.vertex_count(),
            faces: mesh.face_count(),
            min: bounds.map(|(lo, _)| [lo.x, lo.y, lo.z]),
            max: bounds.map(|(_, hi)| [hi.x, hi.y, hi.z]),
        }
    }
}

/// Size of one sliced layer in its plane frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSummary {
    /// Layer position in draw order.
    pub index: usize,
    /// Offset along the normal.
    pub offset: f64,
    /// Number of contours.
    pub contours: usize,
    /// How many of them are closed loops.
    pub closed: usize,
    /// Summed contour length, in meters.
    pub perimeter: f64,
    /// Summed absolute enclosed area of closed contours, in square meters.
    pub area: f64,
}

impl LayerSummary {
    /// Measure `layer` projected with `basis`.
    pub fn of(layer: &Layer, basis: &PlaneBasis) -> Self {
        let flat = layer.project(basis);
        Self {
            index: layer.index,
            offset: layer.offset,
            contours: flat.len(),
            closed: flat.iter().filter(|c| c.closed).count(),
            perimeter: flat.iter().map(|c| c.perimeter()).sum(),
            area: flat
                .iter()
                .filter(|c| c.closed)
                .map(|c| c.signed_area().abs())
                .sum(),
        }
    }
}
