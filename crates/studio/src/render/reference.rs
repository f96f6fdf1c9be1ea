//! A small CPU backend for previews and tests.
//!
//! Shading is an "eye light": the tint of the surface response, scaled by how much the surface
//! faces the viewer. Rays escaping the scene see the environment map, or black. It is enough
//! to check framing, materials and the tile pipeline; physically based backends implement
//! [Renderer] the same way.

use std::sync::Arc;

use rayon::prelude::*;

use super::{
    renderer::{Film, RenderSetup, Renderer, SamplerSettings, TileResult},
    tile::{TileGrid, TileIndex},
};
use crate::{
    camera::{Camera, PixelCoord},
    color::{linear, Rgb},
    error::RendererError,
    ray::Ray,
    scene::Scene,
    shape::IntersectionResult,
    Seed,
};

/// Share of the shading that does not depend on the viewing angle
const AMBIENT: f32 = 0.2;

struct Bound {
    camera: Camera,
    scene: Arc<Scene>,
    sampler: SamplerSettings,
    grid: TileGrid,
}

#[derive(Default)]
pub struct ReferenceRenderer {
    bound: Option<Bound>,
    film: Film,
    /// Next tile to render, 0 outside of a session
    next_tile: TileIndex,
}

impl ReferenceRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Bound {
    fn shade(&self, ray: &Ray) -> Rgb {
        match self.scene.intersect(ray) {
            IntersectionResult::Intersection(record) => {
                let tint = self
                    .scene
                    .bsdf(record.local_info.material)
                    .map_or(linear::WHITE, |bsdf| bsdf.tint());
                let facing = record.local_info.normal.dot(ray.direction).abs();
                (AMBIENT + (1.0 - AMBIENT) * facing) * tint
            }
            IntersectionResult::NoIntersection => self
                .scene
                .environment()
                .map_or(linear::BLACK, |env| env.lookup(ray.direction)),
        }
    }

    fn render_pixel(&self, x: u32, y: u32) -> Rgb {
        let spp = self.sampler.samples_per_pixel;
        if spp == 0 {
            return linear::BLACK;
        }

        let sum = (0..spp)
            .map(|sample_idx| {
                let mut rng = Seed {
                    seed: self.sampler.seed,
                    x,
                    y,
                    sample_idx,
                }
                .into_rng();
                let coords = PixelCoord::sample_around(&mut rng, x, y);
                let ray = self.camera.ray(&mut rng, coords);
                self.shade(&ray)
            })
            .fold(linear::BLACK, |acc, c| acc + c);
        sum / spp as f32
    }
}

impl Renderer for ReferenceRenderer {
    fn configure(&mut self, setup: RenderSetup) -> Result<(), RendererError> {
        let camera = Camera::new(
            &setup.camera,
            setup.grid.image_width(),
            setup.grid.image_height(),
        )?;
        log::debug!(
            "Reference renderer configured: {:?}, {} spp, {} lights (shading is eye light only)",
            setup.integrator,
            setup.sampler.samples_per_pixel,
            setup.scene.lights().len()
        );

        self.film = Film::new(setup.grid.image_width(), setup.grid.image_height());
        self.bound = Some(Bound {
            camera,
            scene: setup.scene,
            sampler: setup.sampler,
            grid: setup.grid,
        });
        self.next_tile = 0;
        Ok(())
    }

    fn begin_session(&mut self) -> Result<(), RendererError> {
        if self.bound.is_none() {
            return Err(RendererError::new("renderer is not configured"));
        }
        self.film.clear();
        self.next_tile = 1;
        Ok(())
    }

    fn process_next_tile(&mut self) -> Result<TileResult, RendererError> {
        let Some(bound) = &self.bound else {
            return Err(RendererError::new("renderer is not configured"));
        };
        if self.next_tile == 0 {
            return Err(RendererError::new("no session in progress"));
        }
        let index = self.next_tile;
        let tile = bound
            .grid
            .tile(index)
            .ok_or_else(|| RendererError::new(format!("tile {index} is out of the grid")))?;

        let width = self.film.width() as usize;
        self.film
            .pixels_mut()
            .par_chunks_mut(width)
            .enumerate()
            .skip(tile.y as usize)
            .take(tile.height as usize)
            .for_each(|(y, row)| {
                for x in tile.xs() {
                    row[x as usize] = bound.render_pixel(x, y as u32);
                }
            });

        self.next_tile += 1;
        Ok(TileResult { index })
    }

    fn is_finished(&self) -> bool {
        match &self.bound {
            Some(bound) => self.next_tile > bound.grid.tile_count(),
            None => false,
        }
    }

    fn end_session(&mut self) {
        self.next_tile = 0;
        log::debug!("Reference renderer session ended");
    }

    fn film(&self) -> &Film {
        &self.film
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        camera::CameraSettings,
        config::IntegratorKind,
        descriptor::{Descriptors, LightDescriptor, LightKind, ShapeDescriptor, ShapeGeometry},
        light::EnvironmentMap,
        loader::{EnvironmentLoader, ImportedMesh, ModelImporter},
        material::MaterialType,
        scene::{BuildOptions, SceneBuilder},
    };

    struct SkyOnly;

    impl ModelImporter for SkyOnly {
        fn load(
            &self,
            _path: &std::path::Path,
        ) -> Result<Vec<ImportedMesh>, crate::error::BuildError> {
            Ok(vec![])
        }
    }

    impl EnvironmentLoader for SkyOnly {
        fn load(
            &self,
            _path: &std::path::Path,
        ) -> Result<EnvironmentMap, crate::error::BuildError> {
            Ok(EnvironmentMap::uniform(Rgb::splat(0.3)))
        }
    }

    fn setup(descriptors: &Descriptors, tiles: (u32, u32), seed: u64) -> RenderSetup {
        let built = SceneBuilder::new(&SkyOnly, &SkyOnly).build(
            descriptors.shapes(),
            descriptors.lights(),
            BuildOptions::default(),
        );
        RenderSetup {
            camera: CameraSettings::default(),
            scene: Arc::new(built.scene),
            sampler: SamplerSettings {
                samples_per_pixel: 4,
                seed,
            },
            integrator: IntegratorKind::default(),
            grid: TileGrid::new(32, 24, tiles.0, tiles.1, None).unwrap(),
        }
    }

    fn sphere_in_sky() -> Descriptors {
        let mut descriptors = Descriptors::new();
        descriptors
            .insert_shape(ShapeDescriptor::with_geometry(
                MaterialType::Mirror,
                ShapeGeometry::Sphere {
                    radius: 2.0,
                    center: [0.0; 3],
                },
            ))
            .unwrap();
        descriptors
            .insert_light(LightDescriptor::new(LightKind::InfiniteArea))
            .unwrap();
        descriptors
    }

    fn render(setup: RenderSetup) -> Film {
        let mut renderer = ReferenceRenderer::new();
        renderer.configure(setup).unwrap();
        renderer.begin_session().unwrap();
        let mut expected = 1;
        while !renderer.is_finished() {
            assert_eq!(renderer.process_next_tile().unwrap().index, expected);
            expected += 1;
        }
        renderer.end_session();
        renderer.film().clone()
    }

    #[test]
    fn renders_every_tile_in_order() {
        let film = render(setup(&sphere_in_sky(), (3, 2), 0));
        // sky in the corner, sphere in the middle
        assert!(film.get(0, 0).0.iter().all(|c| (c - 0.3).abs() < 1e-6));
        assert!(film.get(16, 12).0[0] > 0.3);
    }

    #[test]
    fn same_seed_same_image() {
        let descriptors = sphere_in_sky();
        let a = render(setup(&descriptors, (1, 1), 42));
        let b = render(setup(&descriptors, (4, 3), 42));
        assert_eq!(a, b);
    }

    #[test]
    fn tiles_need_a_session() {
        let mut renderer = ReferenceRenderer::new();
        assert!(renderer.process_next_tile().is_err());
        assert!(renderer.begin_session().is_err());

        renderer
            .configure(setup(&sphere_in_sky(), (1, 1), 0))
            .unwrap();
        assert!(renderer.process_next_tile().is_err());
        renderer.begin_session().unwrap();
        assert!(renderer.process_next_tile().is_ok());
        assert!(renderer.is_finished());
        assert!(renderer.process_next_tile().is_err());
    }

    #[test]
    fn empty_scene_is_black() {
        let setup = setup(&Descriptors::new(), (1, 1), 0);
        assert!(setup.scene.primitives().is_empty());
        let film = render(setup);
        assert_eq!(film.get(5, 5), linear::BLACK);
    }
}
