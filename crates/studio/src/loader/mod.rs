//! Collaborators that read external files while a scene is built.
//!
//! The [crate::scene::SceneBuilder] only sees the [ModelImporter] and [EnvironmentLoader]
//! traits, so tests and other frontends can plug their own sources.

pub mod envmap;
pub mod obj;

use std::path::Path;

pub use envmap::ImageEnvironmentLoader;
pub use obj::ObjImporter;

use crate::{error::BuildError, light::EnvironmentMap, math::Float3};

/// Triangle soup produced by a [ModelImporter].
///
/// `normals` and `uvs` are either empty or have one entry per position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportedMesh {
    pub name: String,
    pub positions: Vec<Float3>,
    pub normals: Vec<Float3>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<[u32; 3]>,
}

pub trait ModelImporter: Sync {
    /// Loads every mesh in the file at `path`.
    ///
    /// Fails with [BuildError::ModelLoadError] on missing or corrupt files.
    fn load(&self, path: &Path) -> Result<Vec<ImportedMesh>, BuildError>;
}

pub trait EnvironmentLoader: Sync {
    /// Fails with [BuildError::EnvironmentMapError] on missing or corrupt files.
    fn load(&self, path: &Path) -> Result<EnvironmentMap, BuildError>;
}
