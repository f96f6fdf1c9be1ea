use bytemuck::{Pod, Zeroable};

use crate::math::Vec3;

pub mod post;

/// A linear RGB triple, as accumulated by a renderer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Zeroable, Pod)]
pub struct Rgb(pub [f32; 3]);

/// 8-bit-per-channel color, as consumed by a preview.
pub type Rgb8 = [u8; 3];

impl Rgb {
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self(arr)
    }

    pub const fn to_array(self) -> [f32; 3] {
        self.0
    }

    pub fn splat(v: f32) -> Self {
        Self([v; 3])
    }

    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self(self.0.map(f))
    }

    pub fn vec(self) -> Vec3 {
        Vec3::from_array(self.0)
    }

    /// Expects channels in [0, 1]
    pub fn to_byte_array(self) -> Rgb8 {
        self.0.map(|c| (c * 255. + 0.5) as u8)
    }
}

impl From<Vec3> for Rgb {
    fn from(val: Vec3) -> Self {
        Rgb(val.to_array())
    }
}

impl std::ops::Add for Rgb {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_array([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
        ])
    }
}

impl std::ops::Mul<Rgb> for f32 {
    type Output = Rgb;

    fn mul(self, rhs: Rgb) -> Self::Output {
        rhs.map(|c| self * c)
    }
}

impl std::ops::Div<f32> for Rgb {
    type Output = Rgb;

    fn div(self, rhs: f32) -> Self::Output {
        self.map(|c| c / rhs)
    }
}

pub mod linear {
    use super::Rgb;

    pub const WHITE: Rgb = Rgb::from_array([1.0, 1.0, 1.0]);
    pub const BLACK: Rgb = Rgb::from_array([0.0, 0.0, 0.0]);
}
