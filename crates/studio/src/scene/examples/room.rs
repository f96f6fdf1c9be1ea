use crate::{
    descriptor::{Descriptors, LightDescriptor, ShapeDescriptor, ShapeGeometry},
    material::MaterialType,
};

/// A closed box made of finite planes, with a disk and a triangle inside
pub struct RoomScene;

impl RoomScene {
    const HALF: f32 = 3.0;

    pub fn insert_into(descriptors: &mut Descriptors) {
        let h = Self::HALF;
        let size = 2.0 * h;
        // (center, inward normal)
        let walls = [
            ([0.0, -h, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, h, 0.0], [0.0, -1.0, 0.0]),
            ([0.0, 0.0, -h], [0.0, 0.0, 1.0]),
            ([-h, 0.0, 0.0], [1.0, 0.0, 0.0]),
            ([h, 0.0, 0.0], [-1.0, 0.0, 0.0]),
        ];

        let mut shapes: Vec<_> = walls
            .into_iter()
            .map(|(position, normal)| {
                ShapeDescriptor::with_geometry(
                    MaterialType::Diffuse,
                    ShapeGeometry::Plane {
                        position,
                        normal,
                        width: size,
                        height: size,
                    },
                )
            })
            .collect();

        shapes.push(ShapeDescriptor::with_geometry(
            MaterialType::Mirror,
            ShapeGeometry::Disk {
                radius: 1.0,
                center: [-1.2, -h + 0.01, -0.5],
                normal: [0.0, 1.0, 0.0],
            },
        ));
        shapes.push(ShapeDescriptor::with_geometry(
            MaterialType::Glass,
            ShapeGeometry::Triangle {
                vertices: [[0.5, -h, -1.0], [2.5, -h, -1.0], [1.5, 0.0, -1.5]],
                uvs: [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]],
                normals: [[0.0; 3]; 3],
            },
        ));
        shapes.push(ShapeDescriptor::with_geometry(
            MaterialType::Diffuse,
            ShapeGeometry::Sphere {
                radius: 0.8,
                center: [0.3, -h + 0.8, 1.0],
            },
        ));

        for shape in shapes {
            if let Err(err) = descriptors.insert_shape(shape) {
                log::error!("Could not insert example shape: {err}");
            }
        }

        let light = LightDescriptor::Point {
            position: [0.0, h - 0.5, 0.0],
            intensity: [8.0; 3],
        };
        if let Err(err) = descriptors.insert_light(light) {
            log::error!("Could not insert example light: {err}");
        }
    }
}
