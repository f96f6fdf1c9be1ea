use std::ops::Range;

use glam::Vec3;

use crate::ray::Ray;

use super::point::Point;

/// Axis Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub origin: Point,
    /// Should have all coordinates >= origin's
    pub end: Point,
}

impl Bounds {
    pub const INFINITE: Bounds = Bounds {
        origin: Point(Vec3::NEG_INFINITY),
        end: Point(Vec3::INFINITY),
    };

    /// Neutral element of [Bounds::union]
    pub const EMPTY: Bounds = Bounds {
        origin: Point(Vec3::INFINITY),
        end: Point(Vec3::NEG_INFINITY),
    };

    pub fn from_points(points: &[Point]) -> Self {
        let mut origin = Vec3::INFINITY;
        let mut end = Vec3::NEG_INFINITY;
        for p in points {
            origin = origin.min(p.vec());
            end = end.max(p.vec());
        }

        Self {
            origin: Point(origin),
            end: Point(end),
        }
    }

    pub fn union(self, other: Bounds) -> Self {
        Self {
            origin: Point(self.origin.vec().min(other.origin.vec())),
            end: Point(self.end.vec().max(other.end.vec())),
        }
    }

    pub fn diag(&self) -> Vec3 {
        self.end - self.origin
    }

    pub fn centroid(&self) -> Point {
        self.origin + 0.5 * self.diag()
    }

    /// Unbounded shapes (eg. infinite planes) can't be put in a spatial index
    pub fn is_finite(&self) -> bool {
        self.origin.vec().is_finite() && self.end.vec().is_finite()
    }

    pub fn contains(&self, point: Point) -> bool {
        let p = point.vec();
        p.cmpge(self.origin.vec()).all() && p.cmple(self.end.vec()).all()
    }

    /// Slab test, returns the parametric range in which the ray is inside the box
    pub fn ray_intersect(&self, ray: &Ray) -> Option<Range<f32>> {
        let inv_dir = ray.direction.recip();
        let ts_start = (self.origin - ray.origin) * inv_dir;
        let ts_end = (self.end - ray.origin) * inv_dir;

        let t_min = Vec3::min(ts_start, ts_end).max_element().max(ray.bounds.0);
        let t_max = Vec3::max(ts_start, ts_end).min_element().min(ray.bounds.1);

        // NaN appear when the ray lies exactly on a slab, treat it as a hit
        if t_min.is_nan() || t_max.is_nan() || t_min <= t_max {
            Some(t_min..t_max)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::Bounds;
    use crate::{math::point::Point, ray::Ray};

    #[test]
    fn from_points_and_union() {
        let a = Bounds::from_points(&[Point::new(0., 0., 0.), Point::new(1., -1., 2.)]);
        assert_eq!(a.origin, Point::new(0., -1., 0.));
        assert_eq!(a.end, Point::new(1., 0., 2.));

        let b = Bounds::from_points(&[Point::new(-3., 0., 0.)]);
        let u = a.union(b);
        assert_eq!(u.origin, Point::new(-3., -1., 0.));
        assert!(u.contains(Point::new(-1., -0.5, 1.)));
        assert!(!u.contains(Point::new(2., 0., 0.)));
    }

    #[test]
    fn slab_test() {
        let b = Bounds::from_points(&[Point::new(-1., -1., -1.), Point::new(1., 1., 1.)]);
        let hit = Ray::new(Point::new(0., 0., -5.), Vec3::Z);
        let range = b.ray_intersect(&hit).unwrap();
        assert!((range.start - 4.0).abs() < 1e-5);
        assert!((range.end - 6.0).abs() < 1e-5);

        let miss = Ray::new(Point::new(0., 3., -5.), Vec3::Z);
        assert!(b.ray_intersect(&miss).is_none());

        let behind = Ray::new(Point::new(0., 0., 5.), Vec3::Z);
        assert!(b.ray_intersect(&behind).is_none());
    }

    #[test]
    fn infinite_bounds_are_not_finite() {
        assert!(!Bounds::INFINITE.is_finite());
        assert!(Bounds::from_points(&[Point::ORIGIN]).is_finite());
    }
}
