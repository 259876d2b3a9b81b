//! Where mesh bytes come from.
//!
//! A source maps an opaque identifier to raw OBJ bytes. Sources never retry
//! and never cache; each call is a fresh fetch.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{info, instrument};

use crate::error::{MeshError, Result};
use crate::mesh::Mesh;
use crate::obj::parse_obj_bytes;

/// Supplies raw mesh text for an identifier.
pub trait MeshSource {
    /// Fetch the bytes for `id`.
    fn fetch(&self, id: &str) -> Result<Vec<u8>>;
}

/// Reads meshes from files under a root directory.
///
/// Identifiers are relative paths; absolute paths and `..` components are
/// rejected so a caller cannot escape the root.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, id: &str) -> Result<PathBuf> {
        let rel = Path::new(id);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if id.is_empty() || escapes {
            return Err(MeshError::UnknownMesh(id.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

impl MeshSource for FileSource {
    fn fetch(&self, id: &str) -> Result<Vec<u8>> {
        let path = self.resolve(id)?;
        fs::read(&path).map_err(|source| MeshError::Transport {
            id: id.to_string(),
            source,
        })
    }
}

/// Serves meshes from memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    meshes: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register mesh bytes under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.meshes.insert(id.into(), bytes.into());
    }

    /// Builder form of [`MemorySource::insert`].
    pub fn with(mut self, id: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(id, bytes);
        self
    }
}

impl MeshSource for MemorySource {
    fn fetch(&self, id: &str) -> Result<Vec<u8>> {
        self.meshes
            .get(id)
            .cloned()
            .ok_or_else(|| MeshError::UnknownMesh(id.to_string()))
    }
}

/// Fetch and parse a mesh.
#[instrument(skip(source))]
pub fn load_mesh<S: MeshSource + ?Sized>(source: &S, id: &str) -> Result<Mesh> {
    let bytes = source.fetch(id)?;
    let mesh = parse_obj_bytes(&bytes)?;
    info!(
        bytes = bytes.len(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "mesh loaded"
    );
    Ok(mesh)
}
