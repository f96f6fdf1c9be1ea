use crate::{
    error::BuildError,
    material::MaterialId,
    math::{bounds::Bounds, float::Vec3AsNonZero, orthonormal_basis, point::Point, Vec3},
    ray::Ray,
};

use super::{plane_hit, IntersectionResult, LocalInfo, RayIntersection, Shape};

#[derive(Debug, Clone, PartialEq)]
pub struct Disk {
    pub center: Point,
    /// Normalized
    pub normal: Vec3,
    pub radius: f32,
    pub material: MaterialId,
}

impl Disk {
    pub fn new(
        center: Point,
        normal: Vec3,
        radius: f32,
        material: MaterialId,
    ) -> Result<Self, BuildError> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(BuildError::degenerate(format!(
                "disk radius must be positive, got {radius}"
            )));
        }
        let normal = normal
            .into_non_zero(1e-6)
            .ok_or_else(|| BuildError::degenerate("disk normal is zero"))?
            .normalize();

        Ok(Self {
            center,
            normal,
            radius,
            material,
        })
    }
}

impl Shape for Disk {
    fn intersection(&self, ray: &Ray) -> IntersectionResult {
        let Some(t) = plane_hit(self.center, self.normal, ray) else {
            return IntersectionResult::NoIntersection;
        };
        let pos = ray.at(t);
        let offset = pos - self.center;
        let dist2 = offset.length_squared();
        if dist2 > self.radius * self.radius {
            return IntersectionResult::NoIntersection;
        }

        let (tangent, bitangent) = orthonormal_basis(self.normal);
        let phi = f32::atan2(offset.dot(bitangent), offset.dot(tangent)) + std::f32::consts::PI;
        IntersectionResult::Intersection(RayIntersection {
            t,
            local_info: LocalInfo {
                pos,
                normal: self.normal,
                material: self.material,
                uv: [
                    phi / (2.0 * std::f32::consts::PI),
                    dist2.sqrt() / self.radius,
                ],
            },
        })
    }

    fn bounding_box(&self) -> Bounds {
        let n = self.normal;
        // Extent of a disk along each axis
        let extent = self.radius
            * Vec3::new(
                (1.0 - n.x * n.x).max(0.0).sqrt(),
                (1.0 - n.y * n.y).max(0.0).sqrt(),
                (1.0 - n.z * n.z).max(0.0).sqrt(),
            );
        Bounds {
            origin: self.center - extent,
            end: self.center + extent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_inside_radius_only() {
        let disk = Disk::new(Point::ORIGIN, Vec3::Y * 3.0, 1.0, MaterialId(0)).unwrap();
        assert_eq!(disk.normal, Vec3::Y);

        let down = |x: f32| Ray::new(Point::new(x, 1.0, 0.0), -Vec3::Y);
        assert_eq!(disk.intersection(&down(0.5)).t(), Some(1.0));
        assert!(!disk.intersection(&down(1.5)).is_intersection());

        let parallel = Ray::new(Point::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(!disk.intersection(&parallel).is_intersection());
    }

    #[test]
    fn flat_bounding_box() {
        let disk = Disk::new(Point::ORIGIN, Vec3::Z, 2.0, MaterialId(0)).unwrap();
        let bounds = disk.bounding_box();
        assert_eq!(bounds.origin, Point::new(-2.0, -2.0, 0.0));
        assert_eq!(bounds.end, Point::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn rejects_degenerate_disks() {
        assert!(Disk::new(Point::ORIGIN, Vec3::ZERO, 1.0, MaterialId(0)).is_err());
        assert!(Disk::new(Point::ORIGIN, Vec3::Y, 0.0, MaterialId(0)).is_err());
    }
}
