use std::fmt::Display;

use super::path::BoundedPath;
use crate::{
    error::BuildError,
    material::MaterialType,
    math::Float3,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Disk,
    Sphere,
    InfinitePlane,
    Plane,
    Triangle,
    Mesh,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        Self::Mesh,
        Self::InfinitePlane,
        Self::Sphere,
        Self::Disk,
        Self::Triangle,
        Self::Plane,
    ];
}

impl Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ShapeKind::Disk => "Disk",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::InfinitePlane => "Infinite Plane",
            ShapeKind::Plane => "Plane",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Mesh => "Mesh",
        })
    }
}

/// Kind specific parameters of a shape
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    Disk {
        radius: f32,
        center: Float3,
        normal: Float3,
    },
    Sphere {
        radius: f32,
        center: Float3,
    },
    InfinitePlane {
        position: Float3,
        normal: Float3,
    },
    Plane {
        position: Float3,
        normal: Float3,
        width: f32,
        height: f32,
    },
    Triangle {
        vertices: [Float3; 3],
        uvs: [Float3; 3],
        normals: [Float3; 3],
    },
    Mesh {
        model_path: BoundedPath,
        support_key_frame: bool,
    },
}

impl ShapeGeometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeGeometry::Disk { .. } => ShapeKind::Disk,
            ShapeGeometry::Sphere { .. } => ShapeKind::Sphere,
            ShapeGeometry::InfinitePlane { .. } => ShapeKind::InfinitePlane,
            ShapeGeometry::Plane { .. } => ShapeKind::Plane,
            ShapeGeometry::Triangle { .. } => ShapeKind::Triangle,
            ShapeGeometry::Mesh { .. } => ShapeKind::Mesh,
        }
    }
}

/// An editable shape, as the editing layer sees it.
///
/// `material_type` holds the raw tag picked in the editor. It is only checked when the
/// scene is built, see [MaterialType].
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDescriptor {
    pub material_type: i32,
    pub geometry: ShapeGeometry,
}

impl ShapeDescriptor {
    pub const DEFAULT_MODEL_PATH: &'static str = "./data/models/test.obj";

    /// A descriptor of the given kind with every parameter zeroed and a glass material
    pub fn new(kind: ShapeKind) -> Self {
        let geometry = match kind {
            ShapeKind::Disk => ShapeGeometry::Disk {
                radius: 0.0,
                center: [0.0; 3],
                normal: [0.0; 3],
            },
            ShapeKind::Sphere => ShapeGeometry::Sphere {
                radius: 0.0,
                center: [0.0; 3],
            },
            ShapeKind::InfinitePlane => ShapeGeometry::InfinitePlane {
                position: [0.0; 3],
                normal: [0.0; 3],
            },
            ShapeKind::Plane => ShapeGeometry::Plane {
                position: [0.0; 3],
                normal: [0.0; 3],
                width: 0.0,
                height: 0.0,
            },
            ShapeKind::Triangle => ShapeGeometry::Triangle {
                vertices: [[0.0; 3]; 3],
                uvs: [[0.0; 3]; 3],
                normals: [[0.0; 3]; 3],
            },
            ShapeKind::Mesh => ShapeGeometry::Mesh {
                model_path: BoundedPath(Self::DEFAULT_MODEL_PATH.to_owned()),
                support_key_frame: false,
            },
        };

        Self {
            material_type: MaterialType::Glass.tag(),
            geometry,
        }
    }

    pub fn with_geometry(material: MaterialType, geometry: ShapeGeometry) -> Self {
        Self {
            material_type: material.tag(),
            geometry,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn material(&self) -> Result<MaterialType, BuildError> {
        MaterialType::try_from(self.material_type)
    }

    pub fn set_material(&mut self, material: MaterialType) {
        self.material_type = material.tag();
    }
}
