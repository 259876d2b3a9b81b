#![warn(missing_docs)]

//! Printable drawings of sliced contours.
//!
//! A drawing is a fixed physical page (millimeters) with a logical window
//! in meters. [`compose`] lays an optional measurement grid and one polygon
//! per contour onto a [`Document`]; [`to_svg`] writes it out so that one
//! meter in the mesh is one meter on paper.
//!
//! # Example
//!
//! ```
//! use footslice_drawing::{compose, ComposeOptions, SVG_MEDIA_TYPE};
//!
//! let doc = compose(&ComposeOptions::default(), &[], &[]).unwrap();
//! let svg = doc.to_svg();
//! assert!(svg.contains(r#"viewBox="0 0 0.21 0.297""#));
//! assert_eq!(SVG_MEDIA_TYPE, "image/svg+xml");
//! ```

pub mod compose;
pub mod document;
pub mod error;
pub mod grid;
pub mod svg;

pub use compose::{compose, compose_layers, ComposeOptions, LayerStyle};
pub use document::{Document, Element, Fill, PageSize, Stroke, ViewBox};
pub use error::{DrawingError, Result};
pub use grid::{grid_element, grid_lines, GridSpacing, MAX_GRID_LINES};
pub use svg::{to_svg, SVG_MEDIA_TYPE};
