use crate::{color::Rgb, error::BuildError};

/// The surface responses an editor can pick for a shape.
///
/// The discriminants are the values the editing layer stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum MaterialType {
    Glass = 0,
    Mirror = 1,
    Diffuse = 2,
}

impl MaterialType {
    pub const ALL: [MaterialType; 3] = [Self::Glass, Self::Mirror, Self::Diffuse];

    pub fn tag(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for MaterialType {
    type Error = BuildError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Glass),
            1 => Ok(Self::Mirror),
            2 => Ok(Self::Diffuse),
            value => Err(BuildError::InvalidMaterialType { value }),
        }
    }
}

/// Surface response attached to a primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bsdf {
    Dielectric { ior: f32 },
    Conductor { reflectance: Rgb },
    Diffuse { reflectance: Rgb },
}

impl Bsdf {
    pub const GLASS_IOR: f32 = 1.5;

    pub fn tint(&self) -> Rgb {
        match *self {
            Bsdf::Dielectric { .. } => Rgb::splat(1.0),
            Bsdf::Conductor { reflectance } | Bsdf::Diffuse { reflectance } => reflectance,
        }
    }
}

impl From<MaterialType> for Bsdf {
    fn from(value: MaterialType) -> Self {
        match value {
            MaterialType::Glass => Bsdf::Dielectric {
                ior: Self::GLASS_IOR,
            },
            MaterialType::Mirror => Bsdf::Conductor {
                reflectance: Rgb::splat(0.95),
            },
            MaterialType::Diffuse => Bsdf::Diffuse {
                reflectance: Rgb::splat(0.75),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);
