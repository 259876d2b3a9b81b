//! Error types for drawing composition and serialization.

use thiserror::Error;

/// Errors that can occur while composing or writing a drawing.
#[derive(Error, Debug)]
pub enum DrawingError {
    /// Page dimensions must be positive and finite.
    #[error("invalid page size {width_mm} x {height_mm} mm")]
    InvalidPage {
        /// Requested width in millimeters.
        width_mm: f64,
        /// Requested height in millimeters.
        height_mm: f64,
    },

    /// View box extent must be positive and its corner finite.
    #[error("invalid view box ({x}, {y}, {width}, {height})")]
    InvalidViewBox {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width in meters.
        width: f64,
        /// Height in meters.
        height: f64,
    },

    /// Grid spacing must be positive and finite on both axes.
    #[error("invalid grid spacing ({x}, {y})")]
    InvalidGridSpacing {
        /// Spacing between vertical lines.
        x: f64,
        /// Spacing between horizontal lines.
        y: f64,
    },

    /// Every layer needs exactly one basis.
    #[error("{layers} layers but {bases} plane bases")]
    LayerBasisMismatch {
        /// Number of layers supplied.
        layers: usize,
        /// Number of bases supplied.
        bases: usize,
    },

    /// A layer's plane has no usable frame.
    #[error(transparent)]
    Section(#[from] footslice_section::SectionError),

    /// Writing the serialized document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for drawing operations.
pub type Result<T> = std::result::Result<T, DrawingError>;
