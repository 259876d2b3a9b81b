#![warn(missing_docs)]

//! footslice: printable templates from foot scans.
//!
//! Loads a Wavefront mesh, cuts it with a stack of parallel planes, projects
//! each cut into one shared 2D frame, and lays the contours over a
//! measurement grid on a physical page.
//!
//! # Example
//!
//! ```
//! use footslice::{render_template, MemorySource, TemplateSettings};
//!
//! let obj = "v 0 0 0\nv 0.1 0 0\nv 0 0.1 0\nv 0 0 0.1\n\
//!            f 1 3 2\nf 1 2 4\nf 2 3 4\nf 3 1 4\n";
//! let source = MemorySource::new().with("scan", obj);
//!
//! let output = render_template(&source, "scan", &TemplateSettings::default()).unwrap();
//! assert_eq!(output.media_type, "image/svg+xml");
//! assert_eq!(output.layer_count, 3);
//! assert_eq!(output.contour_count, 3);
//! ```

pub mod error;
pub mod settings;
pub mod summary;
pub mod template;

pub use error::{Result, TemplateError};
pub use settings::TemplateSettings;
pub use summary::{LayerSummary, MeshSummary};
pub use template::{build_document, render_mesh, render_mesh_with, render_template, TemplateOutput};

pub use footslice_drawing::{Document, SVG_MEDIA_TYPE};
pub use footslice_mesh::{load_mesh, FileSource, Mesh, MemorySource, MeshSource};
pub use footslice_section::{CrossSectionSolver, Layer, PlaneIntersector};

pub use footslice_drawing as drawing;
pub use footslice_math as math;
pub use footslice_mesh as mesh;
pub use footslice_section as section;
