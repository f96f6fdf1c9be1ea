use std::path::Path;

use super::EnvironmentLoader;
use crate::{color::Rgb, error::BuildError, light::EnvironmentMap};

/// Reads any image format `image` knows into a linear [EnvironmentMap]
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageEnvironmentLoader;

impl EnvironmentLoader for ImageEnvironmentLoader {
    fn load(&self, path: &Path) -> Result<EnvironmentMap, BuildError> {
        let image = image::open(path)
            .map_err(|err| BuildError::EnvironmentMapError {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?
            .into_rgb32f();

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(BuildError::EnvironmentMapError {
                path: path.display().to_string(),
                reason: "image is empty".to_owned(),
            });
        }
        let pixels: Vec<Rgb> = bytemuck::cast_slice(image.as_raw().as_slice()).to_vec();
        log::debug!("Loaded environment map {} ({width}x{height})", path.display());

        Ok(EnvironmentMap {
            width,
            height,
            pixels,
        })
    }
}
