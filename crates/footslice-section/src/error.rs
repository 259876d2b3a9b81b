//! Error types for plane construction and slicing.

use footslice_mesh::MeshError;
use thiserror::Error;

/// Errors that can occur while building planes or slicing a mesh.
#[derive(Error, Debug)]
pub enum SectionError {
    /// The plane normal has zero length or is not finite.
    #[error("invalid plane: normal ({x}, {y}, {z}) has no direction")]
    InvalidPlane {
        /// X component of the rejected normal.
        x: f64,
        /// Y component of the rejected normal.
        y: f64,
        /// Z component of the rejected normal.
        z: f64,
    },

    /// The offset list or offset range cannot be sliced.
    #[error("invalid offsets: {0}")]
    InvalidOffsets(String),

    /// The mesh cannot be read by the solver.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Result type for section operations.
pub type Result<T> = std::result::Result<T, SectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SectionError::InvalidPlane {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        assert!(err.to_string().contains("invalid plane"));

        let err: SectionError = MeshError::MalformedMesh {
            face: 2,
            index: 9,
            vertex_count: 4,
        }
        .into();
        assert!(err.to_string().contains("face 2"));
    }
}
