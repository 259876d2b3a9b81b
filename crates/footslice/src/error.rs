//! Error type for the end-to-end pipeline.

use footslice_drawing::DrawingError;
use footslice_mesh::MeshError;
use footslice_section::SectionError;
use thiserror::Error;

/// Any failure while producing a template. The partial document, if any,
/// is discarded.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Fetching or parsing the mesh failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// The cutting plane or offsets were unusable.
    #[error(transparent)]
    Section(#[from] SectionError),

    /// The drawing could not be composed or written.
    #[error(transparent)]
    Drawing(#[from] DrawingError),

    /// The placement scale is zero or non-finite, or its translation is
    /// non-finite.
    #[error("invalid placement: scale {scale}, translate ({x}, {y})")]
    InvalidPlacement {
        /// Requested scale.
        scale: f64,
        /// Requested x translation.
        x: f64,
        /// Requested y translation.
        y: f64,
    },

    /// Settings TOML did not parse.
    #[error("invalid settings: {0}")]
    Config(#[from] toml::de::Error),

    /// Reading a settings file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, TemplateError>;
