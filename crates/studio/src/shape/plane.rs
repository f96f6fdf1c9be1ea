use crate::{
    error::BuildError,
    material::MaterialId,
    math::{bounds::Bounds, float::Vec3AsNonZero, orthonormal_basis, point::Point, Vec3},
    ray::Ray,
};

use super::{plane_hit, IntersectionResult, LocalInfo, RayIntersection, Shape};

fn unit_normal(normal: Vec3) -> Result<Vec3, BuildError> {
    normal
        .into_non_zero(1e-6)
        .map(Vec3::normalize)
        .ok_or_else(|| BuildError::degenerate("plane normal is zero"))
}

/// An unbounded plane
#[derive(Debug, Clone, PartialEq)]
pub struct InfinitePlane {
    pub origin: Point,
    pub normal: Vec3,
    pub material: MaterialId,
}

impl InfinitePlane {
    pub fn new(origin: Point, normal: Vec3, material: MaterialId) -> Result<Self, BuildError> {
        Ok(Self {
            origin,
            normal: unit_normal(normal)?,
            material,
        })
    }
}

impl Shape for InfinitePlane {
    fn intersection(&self, ray: &Ray) -> IntersectionResult {
        let Some(t) = plane_hit(self.origin, self.normal, ray) else {
            return IntersectionResult::NoIntersection;
        };

        IntersectionResult::Intersection(RayIntersection {
            t,
            local_info: LocalInfo {
                pos: ray.at(t),
                normal: self.normal,
                material: self.material,
                uv: [0.0, 0.0],
            },
        })
    }

    fn bounding_box(&self) -> Bounds {
        Bounds::INFINITE
    }
}

/// A `width` x `height` rectangle centered on `center`.
///
/// Its edges follow [orthonormal_basis] of the normal: `width` along the tangent, `height` along the bitangent.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub center: Point,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub width: f32,
    pub height: f32,
    pub material: MaterialId,
}

impl Plane {
    pub fn new(
        center: Point,
        normal: Vec3,
        width: f32,
        height: f32,
        material: MaterialId,
    ) -> Result<Self, BuildError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(BuildError::degenerate(format!(
                "plane extent must be positive, got {width}x{height}"
            )));
        }
        let normal = unit_normal(normal)?;
        let (tangent, bitangent) = orthonormal_basis(normal);

        Ok(Self {
            center,
            normal,
            tangent,
            bitangent,
            width,
            height,
            material,
        })
    }

    fn corners(&self) -> [Point; 4] {
        let u = 0.5 * self.width * self.tangent;
        let v = 0.5 * self.height * self.bitangent;
        [
            self.center - u - v,
            self.center + u - v,
            self.center + u + v,
            self.center - u + v,
        ]
    }
}

impl Shape for Plane {
    fn intersection(&self, ray: &Ray) -> IntersectionResult {
        let Some(t) = plane_hit(self.center, self.normal, ray) else {
            return IntersectionResult::NoIntersection;
        };
        let pos = ray.at(t);
        let offset = pos - self.center;
        let u = offset.dot(self.tangent) / self.width + 0.5;
        let v = offset.dot(self.bitangent) / self.height + 0.5;
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return IntersectionResult::NoIntersection;
        }

        IntersectionResult::Intersection(RayIntersection {
            t,
            local_info: LocalInfo {
                pos,
                normal: self.normal,
                material: self.material,
                uv: [u, v],
            },
        })
    }

    fn bounding_box(&self) -> Bounds {
        Bounds::from_points(&self.corners())
    }
}
