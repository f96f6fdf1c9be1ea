pub mod aggregate;
pub mod camera;
pub mod color;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod light;
pub mod loader;
pub mod material;
pub mod math;
pub mod preview;
pub mod ray;
pub mod render;
pub mod scene;
pub mod shape;
pub mod utils;

pub use rand_xoshiro::Xoshiro256StarStar as Rng;

/// Everything that makes a sample reproducible: the same seed always gives the same
/// random sequence for a given pixel and sample index.
#[derive(Debug, Copy, Clone, Hash)]
#[repr(C)]
pub struct Seed {
    pub seed: u64,
    pub x: u32,
    pub y: u32,
    pub sample_idx: u32,
}

impl Seed {
    pub fn into_rng(self) -> Rng {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        std::hash::Hash::hash(&self, &mut hasher);
        <Rng as rand::SeedableRng>::seed_from_u64(std::hash::Hasher::finish(&hasher))
    }
}
