use std::path::Path;

use super::{ImportedMesh, ModelImporter};
use crate::error::BuildError;

/// Wavefront OBJ importer backed by `tobj`. Materials in the file are ignored, the shape
/// descriptor picks the surface response.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjImporter;

fn load_error(path: &Path, reason: impl ToString) -> BuildError {
    BuildError::ModelLoadError {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

impl ModelImporter for ObjImporter {
    fn load(&self, path: &Path) -> Result<Vec<ImportedMesh>, BuildError> {
        let mut options = tobj::GPU_LOAD_OPTIONS;
        options.single_index = true;
        let (models, _materials) =
            tobj::load_obj(path, &options).map_err(|err| load_error(path, err))?;

        models
            .into_iter()
            .map(|model| {
                let mesh = model.mesh;
                log::debug!("Loading model {}", model.name);

                let positions: &[[f32; 3]] = bytemuck::try_cast_slice(mesh.positions.as_slice())
                    .map_err(|err| load_error(path, format!("positions: {err}")))?;
                let normals: &[[f32; 3]] = bytemuck::try_cast_slice(mesh.normals.as_slice())
                    .map_err(|err| load_error(path, format!("normals: {err}")))?;
                let uvs: &[[f32; 2]] = bytemuck::try_cast_slice(mesh.texcoords.as_slice())
                    .map_err(|err| load_error(path, format!("texture coordinates: {err}")))?;
                let indices: &[[u32; 3]] = bytemuck::try_cast_slice(mesh.indices.as_slice())
                    .map_err(|err| load_error(path, format!("indices: {err}")))?;

                if let Some(out_of_range) = indices
                    .iter()
                    .flatten()
                    .find(|&&i| i as usize >= positions.len())
                {
                    return Err(load_error(
                        path,
                        format!("index {out_of_range} is out of range"),
                    ));
                }

                Ok(ImportedMesh {
                    name: model.name,
                    positions: positions.to_vec(),
                    normals: if normals.len() == positions.len() {
                        normals.to_vec()
                    } else {
                        Vec::new()
                    },
                    uvs: if uvs.len() == positions.len() {
                        uvs.to_vec()
                    } else {
                        Vec::new()
                    },
                    indices: indices.to_vec(),
                })
            })
            .collect()
    }
}
