use crate::{
    math::bounds::Bounds,
    ray::Ray,
    shape::{IntersectionResult, Primitive, Shape},
};

/// Tests every primitive in turn
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeList(pub Vec<Primitive>);

impl ShapeList {
    pub fn primitives(&self) -> &[Primitive] {
        &self.0
    }
}

impl Shape for ShapeList {
    fn intersection(&self, ray: &Ray) -> IntersectionResult {
        let mut ray = *ray;
        let mut closest = IntersectionResult::NoIntersection;
        for primitive in &self.0 {
            if let IntersectionResult::Intersection(record) = primitive.intersection(&ray) {
                ray.bounds.1 = record.t;
                closest = IntersectionResult::Intersection(record);
            }
        }
        closest
    }

    fn bounding_box(&self) -> Bounds {
        self.0
            .iter()
            .map(Shape::bounding_box)
            .reduce(Bounds::union)
            .unwrap_or(Bounds::EMPTY)
    }
}
