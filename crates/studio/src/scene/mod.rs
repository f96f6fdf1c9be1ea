pub mod builder;
pub mod examples;

pub use builder::{BuildIssue, BuildOptions, Built, DescriptorRef, SceneBuilder};

use crate::{
    aggregate::PrimitiveSet,
    light::{EnvironmentMap, Light},
    material::{Bsdf, MaterialId, MaterialType},
    ray::Ray,
    shape::{IntersectionResult, Shape},
};

/// Surface responses of a scene, one per distinct [MaterialType]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Materials {
    types: Vec<MaterialType>,
    bsdfs: Vec<Bsdf>,
}

impl Materials {
    /// The id `material` has, or will get once [Materials::insert]ed
    pub fn id(&self, material: MaterialType) -> MaterialId {
        MaterialId(
            self.types
                .iter()
                .position(|&m| m == material)
                .unwrap_or(self.types.len()),
        )
    }

    pub fn insert(&mut self, material: MaterialType) -> MaterialId {
        let id = self.id(material);
        if id.0 == self.types.len() {
            self.types.push(material);
            self.bsdfs.push(Bsdf::from(material));
        }
        id
    }

    pub fn get(&self, id: MaterialId) -> Option<&Bsdf> {
        self.bsdfs.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.bsdfs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bsdfs.is_empty()
    }
}

/// An immutable, renderer-ready scene. Only a [SceneBuilder] makes one.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    primitives: PrimitiveSet,
    materials: Materials,
    lights: Vec<Light>,
}

impl Scene {
    pub fn primitives(&self) -> &PrimitiveSet {
        &self.primitives
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn bsdf(&self, id: MaterialId) -> Option<&Bsdf> {
        self.materials.get(id)
    }

    /// First environment light, used for rays escaping the scene
    pub fn environment(&self) -> Option<&EnvironmentMap> {
        self.lights.iter().find_map(|light| match light {
            Light::InfiniteArea(map) => Some(map),
            _ => None,
        })
    }

    pub fn intersect(&self, ray: &Ray) -> IntersectionResult {
        self.primitives.intersection(ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn materials_are_shared_per_type() {
        let mut materials = Materials::default();
        assert_eq!(materials.id(MaterialType::Mirror), MaterialId(0));
        assert!(materials.is_empty());

        let mirror = materials.insert(MaterialType::Mirror);
        let diffuse = materials.insert(MaterialType::Diffuse);
        assert_eq!(materials.insert(MaterialType::Mirror), mirror);
        assert_eq!(materials.len(), 2);
        assert!(matches!(materials.get(diffuse), Some(Bsdf::Diffuse { .. })));
        assert_eq!(materials.get(MaterialId(2)), None);
    }
}
