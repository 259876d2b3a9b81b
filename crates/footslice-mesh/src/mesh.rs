//! Indexed polygon mesh as read from a scan export.

use footslice_math::{Point3, Vec3};

use crate::error::{MeshError, Result};

/// An indexed mesh.
///
/// Vertices keep whatever coordinates the file provided (normally three);
/// faces keep the 0-based vertex indices of each `f` record in file order.
/// Indices are not validated on construction. Consumers that need positions
/// go through [`Mesh::triangles`], which reports bad references as
/// [`MeshError::MalformedMesh`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec<f64>>,
    faces: Vec<Vec<usize>>,
}

impl Mesh {
    /// Create a mesh from raw vertex coordinates and face indices.
    pub fn new(vertices: Vec<Vec<f64>>, faces: Vec<Vec<usize>>) -> Self {
        Self { vertices, faces }
    }

    /// Build a triangle mesh from 3D positions and index triples.
    pub fn from_triangles(positions: &[[f64; 3]], triangles: &[[usize; 3]]) -> Self {
        Self {
            vertices: positions.iter().map(|p| p.to_vec()).collect(),
            faces: triangles.iter().map(|t| t.to_vec()).collect(),
        }
    }

    /// Raw vertex coordinates, indexed by vertex id.
    pub fn vertices(&self) -> &[Vec<f64>] {
        &self.vertices
    }

    /// Face index lists (0-based).
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True when the mesh has no faces to cut.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Position of a vertex, if it exists and has at least three coordinates.
    pub fn position(&self, vertex: usize) -> Option<Point3> {
        match self.vertices.get(vertex)?.as_slice() {
            [x, y, z, ..] => Some(Point3::new(*x, *y, *z)),
            _ => None,
        }
    }

    /// Triangles of the mesh as index triples.
    ///
    /// Polygons with more than three corners are fanned from their first
    /// corner. Faces with fewer than three corners contribute nothing.
    /// Fails on the first face that references a missing or short vertex.
    pub fn triangles(&self) -> Result<Vec<[usize; 3]>> {
        let mut triangles = Vec::with_capacity(self.faces.len());
        for (face, indices) in self.faces.iter().enumerate() {
            for &index in indices {
                self.checked_position(face, index)?;
            }
            if indices.len() < 3 {
                continue;
            }
            for i in 1..indices.len() - 1 {
                triangles.push([indices[0], indices[i], indices[i + 1]]);
            }
        }
        Ok(triangles)
    }

    /// Run the reference check that loading skips.
    pub fn validate(&self) -> Result<()> {
        self.triangles().map(|_| ())
    }

    /// Axis-aligned bounds of all vertices that have 3D positions.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let mut positions = (0..self.vertices.len()).filter_map(|i| self.position(i));
        let first = positions.next()?;
        let (mut min, mut max) = (first, first);
        for p in positions {
            min = min.inf(&p);
            max = max.sup(&p);
        }
        Some((min, max))
    }

    /// Minimum and maximum signed distance of the vertices along `direction`.
    ///
    /// The direction is normalized first; returns `None` for a zero direction
    /// or a mesh without 3D vertices.
    pub fn extent_along(&self, direction: &Vec3) -> Option<(f64, f64)> {
        let norm = direction.norm();
        if norm == 0.0 || !norm.is_finite() {
            return None;
        }
        let dir = direction / norm;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in (0..self.vertices.len()).filter_map(|i| self.position(i)) {
            let d = p.coords.dot(&dir);
            min = min.min(d);
            max = max.max(d);
        }
        (min <= max).then_some((min, max))
    }

    fn checked_position(&self, face: usize, index: usize) -> Result<Point3> {
        let coords = self.vertices.get(index).ok_or(MeshError::MalformedMesh {
            face,
            index,
            vertex_count: self.vertices.len(),
        })?;
        match coords.as_slice() {
            [x, y, z, ..] => Ok(Point3::new(*x, *y, *z)),
            _ => Err(MeshError::ShortVertex {
                vertex: index,
                dims: coords.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn quad() -> Mesh {
        Mesh::new(
            vec![
                vec![0.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![1.0, 1.0, 0.5],
                vec![0.0, 1.0, 0.5],
            ],
            vec![vec![0, 1, 2, 3]],
        )
    }

    #[test]
    fn test_fan_triangulation() {
        let mesh = quad();
        assert_eq!(mesh.triangles().unwrap(), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_degenerate_faces_skipped() {
        let mesh = Mesh::new(
            vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0]],
            vec![vec![0, 1], vec![]],
        );
        assert!(mesh.triangles().unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_face() {
        let mesh = Mesh::from_triangles(&[[0.0, 0.0, 0.0]], &[[0, 1, 2]]);
        match mesh.triangles() {
            Err(MeshError::MalformedMesh {
                face,
                index,
                vertex_count,
            }) => {
                assert_eq!(face, 0);
                assert_eq!(index, 1);
                assert_eq!(vertex_count, 1);
            }
            other => panic!("expected MalformedMesh, got {other:?}"),
        }
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_short_vertex() {
        let mesh = Mesh::new(
            vec![vec![0.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]],
            vec![vec![0, 1, 2]],
        );
        assert!(matches!(
            mesh.triangles(),
            Err(MeshError::ShortVertex { vertex: 0, dims: 2 })
        ));
        assert!(mesh.position(0).is_none());
        assert!(mesh.position(1).is_some());
    }

    #[test]
    fn test_extra_coordinates_ignored_for_position() {
        let mesh = Mesh::new(vec![vec![1.0, 2.0, 3.0, 1.0]], vec![]);
        assert_eq!(mesh.position(0), Some(Point3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_bounds_and_extent() {
        let mesh = quad();
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 0.5));

        let (lo, hi) = mesh.extent_along(&Vec3::new(0.0, 0.0, 2.0)).unwrap();
        assert_abs_diff_eq!(lo, 0.0);
        assert_abs_diff_eq!(hi, 0.5);

        assert!(mesh.extent_along(&Vec3::zeros()).is_none());
        assert!(Mesh::default().bounds().is_none());
    }
}
