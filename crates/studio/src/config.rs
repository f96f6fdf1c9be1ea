//! Everything a render session needs besides the scene itself.

use std::ops::RangeInclusive;

use crate::{
    camera::CameraSettings,
    color::post::PostProcess,
    error::InvalidTileConfiguration,
    render::tile::{Region, TileGrid},
    scene::BuildOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorKind {
    /// Unidirectional path tracing, paths are randomly terminated after `russian_roulette_depth` bounces
    Path { russian_roulette_depth: u32 },
    /// Direct lighting only. `None` follows specular bounces without limit.
    Direct { max_depth: Option<u32> },
}

impl Default for IntegratorKind {
    fn default() -> Self {
        IntegratorKind::Path {
            russian_roulette_depth: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccelerationKind {
    #[default]
    Bvh,
    Exhaustive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub samples_per_pixel: u32,
    pub integrator: IntegratorKind,
    pub acceleration: AccelerationKind,
    pub post_process: PostProcess,
    /// Only render this part of the image
    pub region: Option<Region>,
    pub frames: RangeInclusive<u32>,
    /// Load per-frame geometry for meshes that support it
    pub key_frames: bool,
    pub seed: u64,
    pub camera: CameraSettings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 1024,
            image_height: 768,
            tiles_x: 10,
            tiles_y: 10,
            samples_per_pixel: 16,
            integrator: Default::default(),
            acceleration: Default::default(),
            post_process: Default::default(),
            region: None,
            frames: 0..=0,
            key_frames: false,
            seed: 0,
            camera: Default::default(),
        }
    }
}

impl RenderConfig {
    pub fn tile_grid(&self) -> Result<TileGrid, InvalidTileConfiguration> {
        TileGrid::new(
            self.image_width,
            self.image_height,
            self.tiles_x,
            self.tiles_y,
            self.region,
        )
    }

    /// Scene build options for `frame`
    pub fn build_options(&self, frame: u32) -> BuildOptions {
        BuildOptions {
            use_spatial_index: self.acceleration == AccelerationKind::Bvh,
            key_frame: self.key_frames.then_some(frame),
        }
    }
}
