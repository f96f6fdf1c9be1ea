use std::sync::Arc;

use crate::{
    camera::CameraSettings,
    color::Rgb,
    config::IntegratorKind,
    error::RendererError,
    scene::Scene,
};

use super::tile::{TileGrid, TileIndex};

/// How pixels are sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerSettings {
    pub samples_per_pixel: u32,
    pub seed: u64,
}

/// Everything a renderer is bound to for one session
#[derive(Debug, Clone)]
pub struct RenderSetup {
    pub camera: CameraSettings,
    pub scene: Arc<Scene>,
    pub sampler: SamplerSettings,
    pub integrator: IntegratorKind,
    pub grid: TileGrid,
}

/// Outcome of one [Renderer::process_next_tile] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileResult {
    /// The tile that was just completed
    pub index: TileIndex,
}

/// Accumulated linear colors of a whole image
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Film {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Black outside of the film
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        if x >= self.width || y >= self.height {
            return Rgb::default();
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }

    /// Row-major pixels
    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgb::default());
    }
}

/// A rendering backend driven tile by tile.
///
/// The expected call sequence is `configure`, `begin_session`, then `process_next_tile` until
/// `is_finished`, then `end_session`. A backend completes tiles in increasing index order.
pub trait Renderer {
    fn configure(&mut self, setup: RenderSetup) -> Result<(), RendererError>;

    fn begin_session(&mut self) -> Result<(), RendererError>;

    /// Renders the next pending tile into the [Film]
    fn process_next_tile(&mut self) -> Result<TileResult, RendererError>;

    /// Whether the whole image has been rendered
    fn is_finished(&self) -> bool;

    fn end_session(&mut self);

    fn film(&self) -> &Film;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn film_access() {
        let mut film = Film::new(3, 2);
        film.set(2, 1, Rgb::splat(0.5));
        film.set(3, 1, Rgb::splat(9.0));
        assert_eq!(film.get(2, 1), Rgb::splat(0.5));
        assert_eq!(film.get(7, 7), Rgb::default());
        assert_eq!(film.pixels_mut().len(), 6);

        film.clear();
        assert_eq!(film.get(2, 1), Rgb::default());
    }
}
