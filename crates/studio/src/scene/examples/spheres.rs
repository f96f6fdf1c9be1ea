use crate::{
    descriptor::{Descriptors, LightDescriptor, ShapeDescriptor, ShapeGeometry},
    material::MaterialType,
};

/// Three spheres of each material on a mirror floor, lit by a point and a spot light
pub struct SpheresScene;

impl SpheresScene {
    pub fn insert_into(descriptors: &mut Descriptors) {
        let shapes = [
            (MaterialType::Diffuse, [-2.2, 0.0, 0.0], 1.0),
            (MaterialType::Glass, [0.0, 0.0, 0.0], 1.0),
            (MaterialType::Mirror, [2.2, 0.0, 0.0], 1.0),
            (MaterialType::Diffuse, [0.0, -0.6, 2.0], 0.4),
        ];
        for (material, center, radius) in shapes {
            Self::insert(
                descriptors,
                ShapeDescriptor::with_geometry(
                    material,
                    ShapeGeometry::Sphere { radius, center },
                ),
            );
        }

        Self::insert(
            descriptors,
            ShapeDescriptor::with_geometry(
                MaterialType::Diffuse,
                ShapeGeometry::InfinitePlane {
                    position: [0.0, -1.0, 0.0],
                    normal: [0.0, 1.0, 0.0],
                },
            ),
        );

        let lights = [
            LightDescriptor::Point {
                position: [0.0, 5.0, 0.0],
                intensity: [10.0; 3],
            },
            LightDescriptor::Spot {
                position: [4.0, 6.0, 4.0],
                direction: [-1.0, -1.5, -1.0],
                intensity: [30.0, 28.0, 24.0],
                cone_angle: 0.6,
                falloff_start: 0.4,
            },
        ];
        for light in lights {
            if let Err(err) = descriptors.insert_light(light) {
                log::error!("Could not insert example light: {err}");
            }
        }
    }

    fn insert(descriptors: &mut Descriptors, shape: ShapeDescriptor) {
        if let Err(err) = descriptors.insert_shape(shape) {
            log::error!("Could not insert example shape: {err}");
        }
    }
}
