//! Collections of primitives a ray is tested against.
//!
//! The [ShapeList] tests every primitive, the [Bvh] walks a bounding volume hierarchy.
//! Both give the same closest hit.

pub mod bvh;
pub mod shapelist;

pub use bvh::{Bvh, BvhBuilder};
pub use shapelist::ShapeList;

use crate::{
    math::bounds::Bounds,
    ray::Ray,
    shape::{IntersectionResult, Primitive, Shape},
};

#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveSet {
    Exhaustive(ShapeList),
    Indexed(Bvh),
}

impl PrimitiveSet {
    pub fn primitives(&self) -> &[Primitive] {
        match self {
            PrimitiveSet::Exhaustive(list) => list.primitives(),
            PrimitiveSet::Indexed(bvh) => bvh.primitives(),
        }
    }

    pub fn len(&self) -> usize {
        self.primitives().len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives().is_empty()
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self, PrimitiveSet::Indexed(_))
    }
}

impl Shape for PrimitiveSet {
    fn intersection(&self, ray: &Ray) -> IntersectionResult {
        match self {
            PrimitiveSet::Exhaustive(list) => list.intersection(ray),
            PrimitiveSet::Indexed(bvh) => bvh.intersection(ray),
        }
    }

    fn bounding_box(&self) -> Bounds {
        match self {
            PrimitiveSet::Exhaustive(list) => list.bounding_box(),
            PrimitiveSet::Indexed(bvh) => bvh.bounding_box(),
        }
    }
}
