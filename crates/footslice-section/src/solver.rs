//! Mesh/plane cross-sections.
//!
//! [`CrossSectionSolver`] is the seam the slice stack calls through. The
//! default implementation, [`PlaneIntersector`], cuts each triangle with the
//! plane and chains the resulting segments into polylines:
//! - Vertices are classified by signed distance with a tolerance
//! - Crossing points are keyed by the mesh edge or vertex they sit on, so
//!   neighbouring triangles agree on shared endpoints exactly
//! - Segments are chained through those keys into ordered contours

use std::collections::{HashMap, HashSet};

use footslice_math::{Point3, Tolerance};
use footslice_mesh::Mesh;

use crate::contour::Contour3;
use crate::error::Result;
use crate::plane::Plane;

/// Computes the contours where a plane cuts a mesh.
///
/// Implementations must be pure functions of their inputs. They may return
/// no contours (the plane misses the mesh or only touches it), and callers
/// must not assume any winding direction.
pub trait CrossSectionSolver: Sync {
    /// Cut `mesh` with `plane`.
    fn solve(&self, mesh: &Mesh, plane: &Plane) -> Result<Vec<Contour3>>;
}

/// Triangle-by-triangle plane intersection with topological chaining.
#[derive(Debug, Clone, Copy)]
pub struct PlaneIntersector {
    /// Vertices closer than this to the plane count as lying on it.
    pub tolerance: f64,
}

impl PlaneIntersector {
    /// Create an intersector with a custom on-plane tolerance.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Default for PlaneIntersector {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::DEFAULT.linear,
        }
    }
}

impl CrossSectionSolver for PlaneIntersector {
    fn solve(&self, mesh: &Mesh, plane: &Plane) -> Result<Vec<Contour3>> {
        let normal = plane.unit_normal()?;
        let origin = plane.origin_point();
        let triangles = mesh.triangles()?;

        let distances: Vec<Option<f64>> = (0..mesh.vertex_count())
            .map(|i| mesh.position(i).map(|p| normal.dot(&(p - origin))))
            .collect();

        let mut seen = HashSet::new();
        let mut segments = Vec::new();
        for tri in &triangles {
            let Some(seg) = cut_triangle(tri, &distances, self.tolerance) else {
                continue;
            };
            if seen.insert(seg.canonical()) {
                segments.push(seg);
            }
        }

        if segments.is_empty() {
            return Ok(Vec::new());
        }

        let chains = chain_segments(&segments);
        Ok(chains
            .into_iter()
            .map(|(keys, closed)| {
                let points = keys
                    .iter()
                    .filter_map(|key| key.position(mesh, &distances))
                    .collect();
                Contour3::new(points, closed)
            })
            .collect())
    }
}

/// Where a crossing point sits on the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Crossing {
    /// A vertex lying on the plane.
    Vertex(usize),
    /// The interior of the edge between two vertices (lower index first).
    Edge(usize, usize),
}

impl Crossing {
    fn edge(a: usize, b: usize) -> Self {
        if a < b {
            Crossing::Edge(a, b)
        } else {
            Crossing::Edge(b, a)
        }
    }

    /// 3D position of the crossing. Edge points are interpolated from the
    /// lower-indexed end so every triangle sharing the edge gets the same point.
    fn position(&self, mesh: &Mesh, distances: &[Option<f64>]) -> Option<Point3> {
        match *self {
            Crossing::Vertex(i) => mesh.position(i),
            Crossing::Edge(a, b) => {
                let pa = mesh.position(a)?;
                let pb = mesh.position(b)?;
                let da = distances.get(a).copied().flatten()?;
                let db = distances.get(b).copied().flatten()?;
                let t = da / (da - db);
                Some(pa + (pb - pa) * t)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    start: Crossing,
    end: Crossing,
}

impl Segment {
    fn canonical(&self) -> (Crossing, Crossing) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Side {
    Above,
    Below,
    On,
}

/// Cut one triangle. Returns a segment only when the plane passes through it;
/// a touch at a single vertex and a coplanar triangle both yield nothing.
fn cut_triangle(tri: &[usize; 3], distances: &[Option<f64>], tol: f64) -> Option<Segment> {
    let mut d = [0.0; 3];
    for (slot, &v) in d.iter_mut().zip(tri) {
        *slot = distances.get(v).copied().flatten()?;
    }

    let side = |x: f64| {
        if x > tol {
            Side::Above
        } else if x < -tol {
            Side::Below
        } else {
            Side::On
        }
    };
    let sides = [side(d[0]), side(d[1]), side(d[2])];

    if sides.iter().all(|s| *s == Side::On) {
        return None;
    }

    let mut crossings: Vec<Crossing> = Vec::with_capacity(2);
    for i in 0..3 {
        let j = (i + 1) % 3;
        if sides[i] == Side::On {
            crossings.push(Crossing::Vertex(tri[i]));
        }
        let opposite = matches!(
            (sides[i], sides[j]),
            (Side::Above, Side::Below) | (Side::Below, Side::Above)
        );
        if opposite {
            crossings.push(Crossing::edge(tri[i], tri[j]));
        }
    }

    match crossings.as_slice() {
        [a, b] if a != b => Some(Segment { start: *a, end: *b }),
        _ => None,
    }
}

/// Chain segments into polylines through shared crossings.
///
/// Returns each chain's crossing sequence and whether it closed on itself.
/// A closed chain does not repeat its first crossing at the end.
fn chain_segments(segments: &[Segment]) -> Vec<(Vec<Crossing>, bool)> {
    // crossing -> list of (segment_index, is_end_point)
    let mut adjacency: HashMap<Crossing, Vec<(usize, bool)>> = HashMap::new();
    for (i, seg) in segments.iter().enumerate() {
        adjacency.entry(seg.start).or_default().push((i, false));
        adjacency.entry(seg.end).or_default().push((i, true));
    }

    let mut used = vec![false; segments.len()];
    let mut chains = Vec::new();

    let next_from = |current: Crossing, used: &mut [bool]| -> Option<Crossing> {
        let neighbors = adjacency.get(&current)?;
        let &(seg_idx, is_end) = neighbors.iter().find(|(idx, _)| !used[*idx])?;
        used[seg_idx] = true;
        let seg = segments[seg_idx];
        Some(if is_end { seg.start } else { seg.end })
    };

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }
        used[start_idx] = true;
        let first = segments[start_idx];
        let mut chain = vec![first.start, first.end];

        // Extend forward from the end
        let mut current = first.end;
        while let Some(next) = next_from(current, &mut used) {
            chain.push(next);
            current = next;
            if next == first.start {
                break;
            }
        }

        let closed = chain.len() > 3 && chain.first() == chain.last();
        if closed {
            chain.pop();
        } else {
            // Extend backward from the start
            let mut current = first.start;
            let mut prefix = Vec::new();
            while let Some(next) = next_from(current, &mut used) {
                prefix.push(next);
                current = next;
            }
            if !prefix.is_empty() {
                prefix.reverse();
                prefix.extend(chain);
                chain = prefix;
            }
        }

        chains.push((chain, closed));
    }

    chains
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SectionError;
    use approx::assert_abs_diff_eq;
    use footslice_math::Vec3;
    use footslice_mesh::MeshError;

    /// Axis-aligned box from `lo` to `hi`, two triangles per side.
    fn make_box(lo: [f64; 3], hi: [f64; 3]) -> Mesh {
        let [x0, y0, z0] = lo;
        let [x1, y1, z1] = hi;
        #[rustfmt::skip]
        let positions = [
            [x0, y0, z0], [x1, y0, z0], [x1, y1, z0], [x0, y1, z0],
            [x0, y0, z1], [x1, y0, z1], [x1, y1, z1], [x0, y1, z1],
        ];
        #[rustfmt::skip]
        let triangles = [
            [0, 2, 1], [0, 3, 2], // Bottom
            [4, 5, 6], [4, 6, 7], // Top
            [0, 1, 5], [0, 5, 4], // Front
            [2, 3, 7], [2, 7, 6], // Back
            [0, 4, 7], [0, 7, 3], // Left
            [1, 2, 6], [1, 6, 5], // Right
        ];
        Mesh::from_triangles(&positions, &triangles)
    }

    #[test]
    fn test_cube_horizontal_section() {
        let mesh = make_box([0.0; 3], [0.1, 0.1, 0.1]);
        let contours = PlaneIntersector::default()
            .solve(&mesh, &Plane::horizontal(0.05))
            .unwrap();

        assert_eq!(contours.len(), 1, "should have 1 contour");
        let contour = &contours[0];
        assert!(contour.closed, "contour should be closed");
        // Four sides, two triangles each
        assert_eq!(contour.len(), 8);
        for p in &contour.points {
            assert_abs_diff_eq!(p.z, 0.05, epsilon = 1e-12);
            assert!(p.x > -1e-12 && p.x < 0.1 + 1e-12);
            assert!(p.y > -1e-12 && p.y < 0.1 + 1e-12);
        }
    }

    #[test]
    fn test_contour_points_are_distinct() {
        let mesh = make_box([0.0; 3], [0.1, 0.1, 0.1]);
        let contours = PlaneIntersector::default()
            .solve(&mesh, &Plane::horizontal(0.03))
            .unwrap();
        let points = &contours[0].points;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                assert!((points[i] - points[j]).norm() > 1e-9);
            }
        }
    }

    #[test]
    fn test_plane_outside_mesh() {
        let mesh = make_box([0.0; 3], [0.1, 0.1, 0.1]);
        let contours = PlaneIntersector::default()
            .solve(&mesh, &Plane::horizontal(0.2))
            .unwrap();
        assert!(contours.is_empty());
    }

    #[test]
    fn test_two_disjoint_loops() {
        // Two boxes side by side, like the two halves of a foot outline
        let a = make_box([0.0; 3], [0.1, 0.1, 0.1]);
        let b = make_box([0.2, 0.0, 0.0], [0.3, 0.1, 0.1]);
        let mut positions: Vec<[f64; 3]> = Vec::new();
        let mut triangles: Vec<[usize; 3]> = Vec::new();
        for mesh in [&a, &b] {
            let base = positions.len();
            for v in mesh.vertices() {
                positions.push([v[0], v[1], v[2]]);
            }
            for f in mesh.faces() {
                triangles.push([f[0] + base, f[1] + base, f[2] + base]);
            }
        }
        let mesh = Mesh::from_triangles(&positions, &triangles);

        let contours = PlaneIntersector::default()
            .solve(&mesh, &Plane::horizontal(0.05))
            .unwrap();
        assert_eq!(contours.len(), 2);
        assert!(contours.iter().all(|c| c.closed));
    }

    #[test]
    fn test_plane_through_vertices() {
        // Plane x + y = 0 only touches the box along the vertical edge at the origin
        let mesh = make_box([0.0, 0.0, 0.0], [0.1, 0.1, 0.1]);
        let tilted = Plane::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        let contours = PlaneIntersector::default().solve(&mesh, &tilted).unwrap();
        for c in &contours {
            for p in &c.points {
                assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
                assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_diagonal_plane_closed() {
        let mesh = make_box([0.0; 3], [0.1, 0.1, 0.1]);
        let plane = Plane::new(Point3::new(0.05, 0.05, 0.05), Vec3::new(0.0, 1.0, 1.0));
        let contours = PlaneIntersector::default().solve(&mesh, &plane).unwrap();
        assert_eq!(contours.len(), 1);
        assert!(contours[0].closed);
        for p in &contours[0].points {
            assert_abs_diff_eq!(plane.signed_distance(p).unwrap(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_open_surface_gives_open_polyline() {
        // A single strip of two triangles standing upright
        let mesh = Mesh::from_triangles(
            &[
                [0.0, 0.0, 0.0],
                [0.1, 0.0, 0.0],
                [0.1, 0.0, 0.1],
                [0.0, 0.0, 0.1],
            ],
            &[[0, 1, 2], [0, 2, 3]],
        );
        let contours = PlaneIntersector::default()
            .solve(&mesh, &Plane::horizontal(0.05))
            .unwrap();
        assert_eq!(contours.len(), 1);
        assert!(!contours[0].closed);
        assert_eq!(contours[0].len(), 3);
    }

    #[test]
    fn test_malformed_mesh() {
        let mesh = Mesh::from_triangles(&[[0.0, 0.0, 0.0]], &[[0, 1, 2]]);
        let err = PlaneIntersector::default()
            .solve(&mesh, &Plane::horizontal(0.0))
            .unwrap_err();
        assert!(matches!(
            err,
            SectionError::Mesh(MeshError::MalformedMesh { index: 1, .. })
        ));
    }

    #[test]
    fn test_zero_normal() {
        let mesh = make_box([0.0; 3], [0.1, 0.1, 0.1]);
        let plane = Plane::new(Point3::origin(), Vec3::zeros());
        assert!(matches!(
            PlaneIntersector::default().solve(&mesh, &plane),
            Err(SectionError::InvalidPlane { .. })
        ));
    }

    #[test]
    fn test_cut_triangle_cases() {
        let distances = |d: [f64; 3]| d.map(Some).to_vec();
        let tri = [0, 1, 2];
        let tol = 1e-9;

        // All above
        assert!(cut_triangle(&tri, &distances([1.0, 2.0, 3.0]), tol).is_none());
        // Coplanar
        assert!(cut_triangle(&tri, &distances([0.0, 0.0, 0.0]), tol).is_none());
        // Touch at one vertex
        assert!(cut_triangle(&tri, &distances([0.0, 1.0, 1.0]), tol).is_none());
        // Through one vertex and the opposite edge
        let seg = cut_triangle(&tri, &distances([0.0, 1.0, -1.0]), tol).unwrap();
        assert_eq!(
            seg.canonical(),
            (Crossing::Vertex(0), Crossing::Edge(1, 2))
        );
        // Edge in plane
        let seg = cut_triangle(&tri, &distances([0.0, 0.0, 1.0]), tol).unwrap();
        assert_eq!(seg.canonical(), (Crossing::Vertex(0), Crossing::Vertex(1)));
        // Two edge crossings
        let seg = cut_triangle(&tri, &distances([-1.0, 1.0, 1.0]), tol).unwrap();
        assert_eq!(
            seg.canonical(),
            (Crossing::Edge(0, 1), Crossing::Edge(0, 2))
        );
    }
}
