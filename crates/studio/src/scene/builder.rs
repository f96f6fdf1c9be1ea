//! Turns editable descriptors into a renderer-ready [Scene].
//!
//! Building never fails as a whole: a descriptor that cannot be translated is logged, reported
//! as a [BuildIssue] and skipped. An empty scene is a valid result.
//!
//! The output only depends on the descriptor lists, the [BuildOptions] and the files the
//! collaborators read: primitives and lights keep the order of their descriptors.

use std::path::PathBuf;

use super::{Materials, Scene};
use crate::{
    aggregate::{BvhBuilder, PrimitiveSet, ShapeList},
    color::Rgb,
    descriptor::{DescriptorList, Id, LightDescriptor, ShapeDescriptor, ShapeGeometry},
    error::BuildError,
    light::Light,
    loader::{EnvironmentLoader, ImportedMesh, ModelImporter},
    material::{MaterialId, MaterialType},
    math::{point::Point, Float3Ext, Vec3},
    shape::{Disk, InfinitePlane, Plane, Primitive, Sphere, Triangle},
    utils::timer::{format_elapsed, timed_scope},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Index primitives in a [crate::aggregate::Bvh] instead of testing them all
    pub use_spatial_index: bool,
    /// Frame whose geometry key-framed meshes load. `None` always loads the base model.
    pub key_frame: Option<u32>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            use_spatial_index: true,
            key_frame: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorRef {
    Shape(Id<ShapeDescriptor>),
    Light(Id<LightDescriptor>),
}

/// A descriptor that was skipped, and why
#[derive(Debug, Clone, PartialEq)]
pub struct BuildIssue {
    pub item: DescriptorRef,
    pub error: BuildError,
}

#[derive(Debug)]
pub struct Built {
    pub scene: Scene,
    pub issues: Vec<BuildIssue>,
}

pub struct SceneBuilder<'a> {
    pub importer: &'a dyn ModelImporter,
    pub environments: &'a dyn EnvironmentLoader,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(importer: &'a dyn ModelImporter, environments: &'a dyn EnvironmentLoader) -> Self {
        Self {
            importer,
            environments,
        }
    }

    pub fn build(
        &self,
        shapes: &DescriptorList<ShapeDescriptor>,
        lights: &DescriptorList<LightDescriptor>,
        options: BuildOptions,
    ) -> Built {
        let timed = timed_scope(|| self.build_inner(shapes, lights, options));
        let built = timed.res;
        log::info!(
            "Built scene: {} primitives, {} lights, {} skipped descriptors in {}",
            built.scene.primitives.len(),
            built.scene.lights.len(),
            built.issues.len(),
            format_elapsed(timed.elapsed)
        );
        built
    }

    fn build_inner(
        &self,
        shapes: &DescriptorList<ShapeDescriptor>,
        lights: &DescriptorList<LightDescriptor>,
        options: BuildOptions,
    ) -> Built {
        let mut issues = Vec::new();
        let mut materials = Materials::default();
        let mut primitives = Vec::new();

        for (id, shape) in shapes.iter() {
            match self.build_shape(shape, &materials, options.key_frame) {
                Ok((material, mut new_primitives)) => {
                    materials.insert(material);
                    log::trace!(
                        "Shape {id:?} ({}) gave {} primitives",
                        shape.kind(),
                        new_primitives.len()
                    );
                    primitives.append(&mut new_primitives);
                }
                Err(error) => {
                    log::warn!("Skipping shape {id:?} ({}): {error}", shape.kind());
                    issues.push(BuildIssue {
                        item: DescriptorRef::Shape(id),
                        error,
                    });
                }
            }
        }

        let mut scene_lights = Vec::new();
        for (id, light) in lights.iter() {
            match self.build_light(light) {
                Ok(Some(light)) => scene_lights.push(light),
                Ok(None) => {
                    log::warn!("Area light {id:?} has no emitting shape bound yet, skipping it")
                }
                Err(error) => {
                    log::warn!("Skipping light {id:?} ({}): {error}", light.kind());
                    issues.push(BuildIssue {
                        item: DescriptorRef::Light(id),
                        error,
                    });
                }
            }
        }

        let primitives = if options.use_spatial_index {
            let mut builder = BvhBuilder::new();
            builder.extend(primitives);
            PrimitiveSet::Indexed(builder.finalize())
        } else {
            PrimitiveSet::Exhaustive(ShapeList(primitives))
        };

        Built {
            scene: Scene {
                primitives,
                materials,
                lights: scene_lights,
            },
            issues,
        }
    }

    fn build_shape(
        &self,
        shape: &ShapeDescriptor,
        materials: &Materials,
        key_frame: Option<u32>,
    ) -> Result<(MaterialType, Vec<Primitive>), BuildError> {
        let material_type = shape.material()?;
        let material = materials.id(material_type);

        let primitives = match &shape.geometry {
            ShapeGeometry::Disk {
                radius,
                center,
                normal,
            } => vec![Primitive::Disk(Disk::new(
                Point::from(*center),
                normal.vec(),
                *radius,
                material,
            )?)],
            ShapeGeometry::Sphere { radius, center } => vec![Primitive::Sphere(Sphere::new(
                Point::from(*center),
                *radius,
                material,
            )?)],
            ShapeGeometry::InfinitePlane { position, normal } => {
                vec![Primitive::InfinitePlane(InfinitePlane::new(
                    Point::from(*position),
                    normal.vec(),
                    material,
                )?)]
            }
            ShapeGeometry::Plane {
                position,
                normal,
                width,
                height,
            } => vec![Primitive::Plane(Plane::new(
                Point::from(*position),
                normal.vec(),
                *width,
                *height,
                material,
            )?)],
            ShapeGeometry::Triangle {
                vertices,
                uvs,
                normals,
            } => vec![Primitive::Triangle(Triangle::new(
                vertices.map(Point::from),
                normals.map(Float3Ext::vec),
                uvs.map(|[u, v, _]| [u, v]),
                material,
            )?)],
            ShapeGeometry::Mesh {
                model_path,
                support_key_frame,
            } => {
                let path = match key_frame {
                    Some(frame) if *support_key_frame => model_path.with_key_frame(frame),
                    _ => PathBuf::from(model_path.as_path()),
                };
                let meshes = self.importer.load(&path)?;
                let triangles: Vec<_> = meshes
                    .iter()
                    .flat_map(|mesh| mesh_triangles(mesh, material))
                    .collect();
                if triangles.is_empty() {
                    return Err(BuildError::degenerate(format!(
                        "{} has no usable triangle",
                        path.display()
                    )));
                }
                triangles
            }
        };

        Ok((material_type, primitives))
    }

    fn build_light(&self, light: &LightDescriptor) -> Result<Option<Light>, BuildError> {
        let light = match light {
            LightDescriptor::Point {
                position,
                intensity,
            } => Light::Point {
                position: Point::from(*position),
                intensity: Rgb::from_array(*intensity),
            },
            LightDescriptor::Spot {
                position,
                direction,
                intensity,
                cone_angle,
                falloff_start,
            } => Light::spot(
                Point::from(*position),
                direction.vec(),
                Rgb::from_array(*intensity),
                *cone_angle,
                *falloff_start,
            )?,
            LightDescriptor::Area { .. } => return Ok(None),
            LightDescriptor::InfiniteArea { image_path } => {
                Light::InfiniteArea(self.environments.load(image_path.as_path())?)
            }
        };
        Ok(Some(light))
    }
}

/// Faces with zero area or out of range indices are dropped
fn mesh_triangles(mesh: &ImportedMesh, material: MaterialId) -> Vec<Primitive> {
    let mut degenerate = 0;
    let triangles: Vec<_> = mesh
        .indices
        .iter()
        .filter_map(|face| {
            let idx = face.map(|i| i as usize);
            let [Some(a), Some(b), Some(c)] = idx.map(|i| mesh.positions.get(i)) else {
                degenerate += 1;
                return None;
            };
            let vertices = [*a, *b, *c].map(Point::from);
            let normals = idx.map(|i| mesh.normals.get(i).map_or(Vec3::ZERO, |n| n.vec()));
            let uvs = idx.map(|i| mesh.uvs.get(i).copied().unwrap_or_default());
            match Triangle::new(vertices, normals, uvs, material) {
                Ok(triangle) => Some(Primitive::Triangle(triangle)),
                Err(_) => {
                    degenerate += 1;
                    None
                }
            }
        })
        .collect();

    if degenerate > 0 {
        log::debug!("Dropped {degenerate} degenerate faces of {}", mesh.name);
    }
    triangles
}

#[cfg(test)]
mod tests {
    use std::{path::Path, sync::Mutex};

    use super::*;
    use crate::{
        descriptor::{BoundedPath, Descriptors, LightKind, ShapeKind},
        light::EnvironmentMap,
    };

    /// Returns a single-triangle mesh for every path and remembers the requests
    #[derive(Default)]
    struct FakeImporter {
        requested: Mutex<Vec<PathBuf>>,
    }

    impl ModelImporter for FakeImporter {
        fn load(&self, path: &Path) -> Result<Vec<ImportedMesh>, BuildError> {
            self.requested.lock().unwrap().push(path.to_owned());
            if path.to_string_lossy().contains("missing") {
                return Err(BuildError::ModelLoadError {
                    path: path.display().to_string(),
                    reason: "not found".to_owned(),
                });
            }
            Ok(vec![ImportedMesh {
                name: "tri".to_owned(),
                positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [2.0, 0.0, 0.0]],
                normals: vec![],
                uvs: vec![],
                // second face is degenerate
                indices: vec![[0, 1, 2], [0, 1, 3]],
            }])
        }
    }

    struct FakeEnvironments;

    impl EnvironmentLoader for FakeEnvironments {
        fn load(&self, path: &Path) -> Result<EnvironmentMap, BuildError> {
            if path.to_string_lossy().contains("missing") {
                return Err(BuildError::EnvironmentMapError {
                    path: path.display().to_string(),
                    reason: "not found".to_owned(),
                });
            }
            Ok(EnvironmentMap::uniform(Rgb::splat(0.5)))
        }
    }

    fn sphere(material: MaterialType, center: [f32; 3], radius: f32) -> ShapeDescriptor {
        ShapeDescriptor::with_geometry(material, ShapeGeometry::Sphere { radius, center })
    }

    fn mixed_scene() -> Descriptors {
        let mut d = Descriptors::new();
        d.insert_shape(sphere(MaterialType::Diffuse, [0.0; 3], 1.0)).unwrap();
        d.insert_shape(ShapeDescriptor::with_geometry(
            MaterialType::Mirror,
            ShapeGeometry::InfinitePlane {
                position: [0.0, -1.0, 0.0],
                normal: [0.0, 1.0, 0.0],
            },
        ))
        .unwrap();
        d.insert_shape(ShapeDescriptor::with_geometry(
            MaterialType::Glass,
            ShapeGeometry::Plane {
                position: [0.0, 3.0, 0.0],
                normal: [0.0, -1.0, 0.0],
                width: 2.0,
                height: 1.0,
            },
        ))
        .unwrap();
        d.insert_shape(ShapeDescriptor::with_geometry(
            MaterialType::Diffuse,
            ShapeGeometry::Mesh {
                model_path: BoundedPath::new("models/tri.obj").unwrap(),
                support_key_frame: true,
            },
        ))
        .unwrap();
        d.insert_light(LightDescriptor::Point {
            position: [0.0, 5.0, 0.0],
            intensity: [1.0; 3],
        })
        .unwrap();
        d.insert_light(LightDescriptor::Spot {
            position: [0.0, 5.0, 0.0],
            direction: [0.0, -1.0, 0.0],
            intensity: [1.0; 3],
            cone_angle: 0.5,
            falloff_start: 0.25,
        })
        .unwrap();
        d.insert_light(LightDescriptor::InfiniteArea {
            image_path: BoundedPath::new("sky.png").unwrap(),
        })
        .unwrap();
        d
    }

    #[test]
    fn build_is_deterministic() {
        let importer = FakeImporter::default();
        let builder = SceneBuilder::new(&importer, &FakeEnvironments);
        let d = mixed_scene();

        for use_spatial_index in [true, false] {
            let options = BuildOptions {
                use_spatial_index,
                key_frame: None,
            };
            let first = builder.build(d.shapes(), d.lights(), options);
            let second = builder.build(d.shapes(), d.lights(), options);

            assert!(first.issues.is_empty());
            assert_eq!(first.scene, second.scene);
            assert_eq!(first.scene.primitives().is_indexed(), use_spatial_index);
            assert_eq!(first.scene.primitives().len(), 4);
            assert_eq!(first.scene.lights().len(), 3);
            assert_eq!(first.scene.materials().len(), 3);
        }
    }

    #[test]
    fn primitives_keep_descriptor_order() {
        let importer = FakeImporter::default();
        let builder = SceneBuilder::new(&importer, &FakeEnvironments);
        let d = mixed_scene();
        let built = builder.build(d.shapes(), d.lights(), BuildOptions::default());

        let kinds: Vec<_> = built
            .scene
            .primitives()
            .primitives()
            .iter()
            .map(|p| match p {
                Primitive::Sphere(_) => "sphere",
                Primitive::Disk(_) => "disk",
                Primitive::Plane(_) => "plane",
                Primitive::InfinitePlane(_) => "infinite plane",
                Primitive::Triangle(_) => "triangle",
            })
            .collect();
        assert_eq!(kinds, ["sphere", "infinite plane", "plane", "triangle"]);
        assert!(matches!(built.scene.lights()[0], Light::Point { .. }));
        assert!(matches!(built.scene.lights()[1], Light::Spot { .. }));
        assert!(built.scene.environment().is_some());
    }

    #[test]
    fn invalid_material_is_skipped() {
        let importer = FakeImporter::default();
        let builder = SceneBuilder::new(&importer, &FakeEnvironments);

        let mut d = Descriptors::new();
        let valid = d.insert_shape(sphere(MaterialType::Diffuse, [0.0; 3], 1.0)).unwrap();
        let invalid = d.add_shape(ShapeKind::Disk).unwrap();
        d.shape_mut(invalid).unwrap().material_type = 5;
        d.insert_shape(sphere(MaterialType::Glass, [3.0, 0.0, 0.0], 1.0)).unwrap();

        let built = builder.build(d.shapes(), d.lights(), BuildOptions::default());
        assert_eq!(built.scene.primitives().len(), 2);
        assert_eq!(
            built.issues,
            vec![BuildIssue {
                item: DescriptorRef::Shape(invalid),
                error: BuildError::InvalidMaterialType { value: 5 },
            }]
        );
        assert!(!built
            .issues
            .iter()
            .any(|issue| issue.item == DescriptorRef::Shape(valid)));
    }

    #[test]
    fn failing_descriptors_are_reported_and_skipped() {
        let importer = FakeImporter::default();
        let builder = SceneBuilder::new(&importer, &FakeEnvironments);

        let mut d = Descriptors::new();
        // zero radius default
        d.add_shape(ShapeKind::Sphere).unwrap();
        d.insert_shape(ShapeDescriptor::with_geometry(
            MaterialType::Diffuse,
            ShapeGeometry::Mesh {
                model_path: BoundedPath::new("missing.obj").unwrap(),
                support_key_frame: false,
            },
        ))
        .unwrap();
        let bad_spot = d
            .insert_light(LightDescriptor::Spot {
                position: [0.0; 3],
                direction: [0.0, -1.0, 0.0],
                intensity: [1.0; 3],
                cone_angle: 0.1,
                falloff_start: 0.2,
            })
            .unwrap();
        d.insert_light(LightDescriptor::InfiniteArea {
            image_path: BoundedPath::new("missing.png").unwrap(),
        })
        .unwrap();
        d.add_light(LightKind::Area).unwrap();

        let built = builder.build(d.shapes(), d.lights(), BuildOptions::default());
        assert!(built.scene.primitives().is_empty());
        assert!(built.scene.lights().is_empty());
        assert_eq!(built.issues.len(), 4);

        let errors: Vec<_> = built.issues.iter().map(|issue| &issue.error).collect();
        assert!(matches!(errors[0], BuildError::DegenerateGeometry { .. }));
        assert!(matches!(errors[1], BuildError::ModelLoadError { .. }));
        assert!(matches!(errors[2], BuildError::InvalidSpotCone { .. }));
        assert!(matches!(errors[3], BuildError::EnvironmentMapError { .. }));
        assert_eq!(built.issues[2].item, DescriptorRef::Light(bad_spot));
    }

    #[test]
    fn key_framed_meshes_load_frame_geometry() {
        let importer = FakeImporter::default();
        let builder = SceneBuilder::new(&importer, &FakeEnvironments);
        let d = mixed_scene();

        builder.build(
            d.shapes(),
            d.lights(),
            BuildOptions {
                use_spatial_index: false,
                key_frame: Some(7),
            },
        );
        builder.build(d.shapes(), d.lights(), BuildOptions::default());

        let requested = importer.requested.lock().unwrap();
        assert_eq!(
            *requested,
            [
                PathBuf::from("models/tri_000007.obj"),
                PathBuf::from("models/tri.obj")
            ]
        );
    }

    #[test]
    fn empty_descriptors_give_an_empty_scene() {
        let importer = FakeImporter::default();
        let builder = SceneBuilder::new(&importer, &FakeEnvironments);
        let d = Descriptors::new();
        let built = builder.build(d.shapes(), d.lights(), BuildOptions::default());
        assert!(built.scene.primitives().is_empty());
        assert!(built.issues.is_empty());
    }
}
