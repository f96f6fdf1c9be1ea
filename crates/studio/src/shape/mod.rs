//! Renderer-side geometry.
//!
//! Every primitive the scene builder can produce is a variant of [Primitive]:
//! - [Sphere]
//! - [Disk]
//! - [Plane], a finite rectangle
//! - [InfinitePlane]
//! - [Triangle], also used for every face of an imported mesh
//!
//! Only [InfinitePlane] is unbounded, see [Shape::bounding_box].

pub mod disk;
pub mod plane;
pub mod sphere;
pub mod triangle;

pub use disk::Disk;
pub use plane::{InfinitePlane, Plane};
pub use sphere::Sphere;
pub use triangle::Triangle;

use crate::{
    material::MaterialId,
    math::{bounds::Bounds, point::Point, Vec3},
    ray::Ray,
};

/// Something a ray can hit.
pub trait Shape: Sync + Send {
    /// Check whether `ray` intersect the shape within its range, if so, gives the local information at the hit
    fn intersection(&self, ray: &Ray) -> IntersectionResult;

    /// Returns the bounding box of the shape. Unbounded shapes return [Bounds::INFINITE]
    fn bounding_box(&self) -> Bounds;
}

/// Contains all the local information that could be needed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalInfo {
    pub pos: Point,
    pub normal: Vec3,
    pub material: MaterialId,
    pub uv: [f32; 2],
}

/// Holds local informations and the time of a colision between a ray and a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayIntersection {
    pub t: f32,
    pub local_info: LocalInfo,
}

/// A `Result`-like type that takes care of intersections data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntersectionResult {
    Intersection(RayIntersection),
    NoIntersection,
}

impl IntersectionResult {
    pub fn is_intersection(&self) -> bool {
        matches!(self, Self::Intersection(_))
    }

    pub fn t(&self) -> Option<f32> {
        match self {
            Self::Intersection(i) => Some(i.t),
            Self::NoIntersection => None,
        }
    }

    pub fn into_option(self) -> Option<RayIntersection> {
        match self {
            Self::Intersection(i) => Some(i),
            Self::NoIntersection => None,
        }
    }

    /// Keeps the closest of the two intersections
    pub fn min(self, other: Self) -> Self {
        let Self::Intersection(RayIntersection { t: t1, .. }) = self else {
            return other;
        };
        let Self::Intersection(RayIntersection { t: t2, .. }) = other else {
            return self;
        };

        if t1 <= t2 {
            self
        } else {
            other
        }
    }
}

/// Closed set of primitives a scene is made of
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Disk(Disk),
    Plane(Plane),
    InfinitePlane(InfinitePlane),
    Triangle(Triangle),
}

impl Primitive {
    pub fn material(&self) -> MaterialId {
        match self {
            Primitive::Sphere(s) => s.material,
            Primitive::Disk(s) => s.material,
            Primitive::Plane(s) => s.material,
            Primitive::InfinitePlane(s) => s.material,
            Primitive::Triangle(s) => s.material,
        }
    }
}

impl Shape for Primitive {
    fn intersection(&self, ray: &Ray) -> IntersectionResult {
        match self {
            Primitive::Sphere(s) => s.intersection(ray),
            Primitive::Disk(s) => s.intersection(ray),
            Primitive::Plane(s) => s.intersection(ray),
            Primitive::InfinitePlane(s) => s.intersection(ray),
            Primitive::Triangle(s) => s.intersection(ray),
        }
    }

    fn bounding_box(&self) -> Bounds {
        match self {
            Primitive::Sphere(s) => s.bounding_box(),
            Primitive::Disk(s) => s.bounding_box(),
            Primitive::Plane(s) => s.bounding_box(),
            Primitive::InfinitePlane(s) => s.bounding_box(),
            Primitive::Triangle(s) => s.bounding_box(),
        }
    }
}

/// Intersection of `ray` with the plane through `origin` with normal `normal`
pub(crate) fn plane_hit(origin: Point, normal: Vec3, ray: &Ray) -> Option<f32> {
    let denom = ray.direction.dot(normal);
    if denom == 0.0 {
        return None;
    }
    let t = -(ray.origin - origin).dot(normal) / denom;
    ray.range().contains(&t).then_some(t)
}
