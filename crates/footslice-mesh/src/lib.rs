#![warn(missing_docs)]

//! Mesh loading for footslice.
//!
//! Reads the Wavefront OBJ text that foot scanners export into an indexed
//! [`Mesh`], and defines the [`MeshSource`] seam that supplies those bytes.
//!
//! # Example
//!
//! ```
//! use footslice_mesh::parse_obj_str;
//!
//! let mesh = parse_obj_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
//! assert_eq!(mesh.vertex_count(), 3);
//! assert_eq!(mesh.faces(), &[vec![0, 1, 2]]);
//! ```

pub mod error;
pub mod mesh;
pub mod obj;
pub mod source;

pub use error::{MeshError, Result};
pub use mesh::Mesh;
pub use obj::{parse_obj, parse_obj_bytes, parse_obj_str};
pub use source::{load_mesh, FileSource, MemorySource, MeshSource};
