use crate::{
    error::BuildError,
    material::MaterialId,
    math::{bounds::Bounds, float::Vec3AsNonZero, point::Point, Vec3},
    ray::Ray,
};

use super::{IntersectionResult, LocalInfo, RayIntersection, Shape};

/// A triangle with per-vertex normals and texture coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Point; 3],
    pub normals: [Vec3; 3],
    pub uvs: [[f32; 2]; 3],
    pub material: MaterialId,
}

/// A private type that stores the result of the Möller-Trumbore algorithm
enum MollerTrumboreResult {
    Result { u: f32, v: f32, t: f32 },
    NoResult,
}

impl MollerTrumboreResult {
    fn moller_trumbore(vertices: [Point; 3], ray: &Ray) -> Self {
        #[allow(non_snake_case)]
        let M = glam::mat3(
            vertices[2] - vertices[0],
            vertices[2] - vertices[1],
            ray.direction,
        );

        if M.determinant() == 0.0 {
            MollerTrumboreResult::NoResult
        } else {
            let [u, v, t] = M.inverse().mul_vec3(vertices[2] - ray.origin).to_array();
            MollerTrumboreResult::Result { u, v, t }
        }
    }
}

impl Triangle {
    /// Builds a triangle. Vertex normals that are zero are replaced by the face normal.
    pub fn new(
        vertices: [Point; 3],
        normals: [Vec3; 3],
        uvs: [[f32; 2]; 3],
        material: MaterialId,
    ) -> Result<Self, BuildError> {
        let face_normal = (vertices[1] - vertices[0])
            .cross(vertices[2] - vertices[0])
            .into_non_zero(1e-12)
            .ok_or_else(|| BuildError::degenerate("triangle has zero area"))?
            .normalize();

        let normals = normals.map(|n| n.into_non_zero(1e-6).map_or(face_normal, Vec3::normalize));

        Ok(Self {
            vertices,
            normals,
            uvs,
            material,
        })
    }

    pub fn face_normal(&self) -> Vec3 {
        (self.vertices[1] - self.vertices[0])
            .cross(self.vertices[2] - self.vertices[0])
            .normalize_or_zero()
    }
}

impl Shape for Triangle {
    fn intersection(&self, ray: &Ray) -> IntersectionResult {
        let MollerTrumboreResult::Result { u, v, t } =
            MollerTrumboreResult::moller_trumbore(self.vertices, ray)
        else {
            return IntersectionResult::NoIntersection;
        };

        let w = 1.0 - u - v;
        if !((0.0..=1.0).contains(&u)
            && (0.0..=1.0).contains(&v)
            && (0.0..=1.0).contains(&w)
            && ray.range().contains(&t))
        {
            return IntersectionResult::NoIntersection;
        }

        let pos = ray.at(t);
        let normal = (u * self.normals[0] + v * self.normals[1] + w * self.normals[2]).normalize();
        let uv = [0, 1].map(|i| u * self.uvs[0][i] + v * self.uvs[1][i] + w * self.uvs[2][i]);
        IntersectionResult::Intersection(RayIntersection {
            t,
            local_info: LocalInfo {
                pos,
                normal,
                material: self.material,
                uv,
            },
        })
    }

    fn bounding_box(&self) -> Bounds {
        Bounds::from_points(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            [
                Point::new(0.0, 0.0, 0.0),
                Point::new(1.0, 0.0, 0.0),
                Point::new(0.0, 1.0, 0.0),
            ],
            [Vec3::ZERO; 3],
            [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            MaterialId(0),
        )
        .unwrap()
    }

    #[test]
    fn missing_normals_use_face_normal() {
        let triangle = unit_triangle();
        assert_eq!(triangle.normals, [Vec3::Z; 3]);
        assert_eq!(triangle.face_normal(), Vec3::Z);
    }

    #[test]
    fn hit_interpolates_uv() {
        let triangle = unit_triangle();
        let ray = Ray::new(Point::new(0.25, 0.25, 1.0), -Vec3::Z);
        let hit = triangle.intersection(&ray).into_option().unwrap();
        assert!((hit.t - 1.0).abs() < 1e-5);
        assert!((hit.local_info.uv[0] - 0.25).abs() < 1e-5);
        assert!((hit.local_info.uv[1] - 0.25).abs() < 1e-5);

        let miss = Ray::new(Point::new(0.75, 0.75, 1.0), -Vec3::Z);
        assert!(!triangle.intersection(&miss).is_intersection());
    }

    #[test]
    fn zero_area_is_degenerate() {
        let collinear = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
        ];
        assert!(matches!(
            Triangle::new(collinear, [Vec3::ZERO; 3], [[0.0; 2]; 3], MaterialId(0)),
            Err(BuildError::DegenerateGeometry { .. })
        ));
    }
}
