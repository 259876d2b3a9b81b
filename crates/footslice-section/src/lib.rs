#![warn(missing_docs)]

//! Cross-sections of scanned meshes.
//!
//! This crate turns a mesh and a list of offsets into a stack of contours:
//!
//! - **Planes and frames**: [`Plane`] and the deterministic in-plane
//!   [`PlaneBasis`] every layer of a stack is projected with
//! - **Solver seam**: [`CrossSectionSolver`], with [`PlaneIntersector`] as the
//!   built-in triangle/plane implementation
//! - **Stacks**: [`slice_stack`] cuts one plane per offset, in parallel,
//!   returning layers in the order the offsets were given
//!
//! # Example
//!
//! ```
//! use footslice_mesh::parse_obj_str;
//! use footslice_section::{slice_stack, PlaneIntersector, StackParams};
//!
//! let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 3 2\nf 1 2 4\nf 2 3 4\nf 3 1 4\n";
//! let mesh = parse_obj_str(obj).unwrap();
//! let layers = slice_stack(
//!     &mesh,
//!     &StackParams::horizontal(vec![0.25, 0.5]),
//!     &PlaneIntersector::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(layers.len(), 2);
//! assert!(layers.iter().all(|l| l.contour_count() == 1));
//! ```

pub mod contour;
pub mod error;
pub mod plane;
pub mod solver;
pub mod stack;

pub use contour::{Contour2, Contour3};
pub use error::{Result, SectionError};
pub use plane::{Plane, PlaneBasis};
pub use solver::{CrossSectionSolver, PlaneIntersector};
pub use stack::{
    offsets_between, offsets_spanning, slice_stack, Layer, StackParams, MAX_OFFSETS,
};
