//! Error types for mesh loading.

use thiserror::Error;

/// Errors that can occur while fetching, parsing, or reading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A coordinate or index token is not numeric.
    #[error("parse error at line {line}: {message} (token `{token}`)")]
    Parse {
        /// Line number (1-indexed).
        line: usize,
        /// The offending token.
        token: String,
        /// Error message.
        message: String,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    MalformedMesh {
        /// Face index (0-based).
        face: usize,
        /// The out-of-range vertex index (0-based).
        index: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A vertex used by a face has fewer than three coordinates.
    #[error("vertex {vertex} has {dims} coordinates, need at least 3")]
    ShortVertex {
        /// Vertex index (0-based).
        vertex: usize,
        /// Number of coordinates the file provided.
        dims: usize,
    },

    /// The mesh source does not know the requested identifier.
    #[error("unknown mesh: {0}")]
    UnknownMesh(String),

    /// The mesh source failed to deliver bytes.
    #[error("failed to fetch mesh {id}: {source}")]
    Transport {
        /// The identifier that was requested.
        id: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error while reading a mesh stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Mesh bytes are not UTF-8 text.
    #[error("mesh is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
