use crate::{
    error::BuildError,
    material::MaterialId,
    math::{bounds::Bounds, point::Point, sphere_uv_from_direction, Vec3},
    ray::Ray,
};

use super::{IntersectionResult, LocalInfo, RayIntersection, Shape};

/// A simple sphere shape, normals point outwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub center: Point,
    pub radius: f32,
    pub material: MaterialId,
}

impl Sphere {
    pub fn new(center: Point, radius: f32, material: MaterialId) -> Result<Self, BuildError> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(BuildError::degenerate(format!(
                "sphere radius must be positive, got {radius}"
            )));
        }
        Ok(Self {
            center,
            radius,
            material,
        })
    }
}

impl Shape for Sphere {
    fn intersection(&self, ray: &Ray) -> IntersectionResult {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b_half = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant_quarter = b_half * b_half - a * c;
        if discriminant_quarter <= 0.0 {
            return IntersectionResult::NoIntersection;
        }

        // First hit if in range, else the second one
        let sqrt_d = f32::sqrt(discriminant_quarter);
        let near = (-b_half - sqrt_d) / a;
        let far = (-b_half + sqrt_d) / a;
        let range = ray.range();
        let t = if range.contains(&near) {
            near
        } else if range.contains(&far) {
            far
        } else {
            return IntersectionResult::NoIntersection;
        };

        let pos = ray.at(t);
        let normal = (pos - self.center).normalize();
        IntersectionResult::Intersection(RayIntersection {
            t,
            local_info: LocalInfo {
                pos,
                normal,
                material: self.material,
                uv: sphere_uv_from_direction(normal),
            },
        })
    }

    fn bounding_box(&self) -> Bounds {
        Bounds {
            origin: self.center - self.radius * Vec3::ONE,
            end: self.center + self.radius * Vec3::ONE,
        }
    }
}
