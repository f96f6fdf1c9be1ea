use crate::{
    math::{bounds::Bounds, Vec3},
    ray::Ray,
    shape::{IntersectionResult, Primitive, Shape},
};

/// Collects primitives for a [Bvh].
///
/// A [Bvh] can only be obtained through [BvhBuilder::finalize], so it is always complete.
#[derive(Debug, Default)]
pub struct BvhBuilder {
    primitives: Vec<Primitive>,
}

impl BvhBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn finalize(self) -> Bvh {
        let primitives = self.primitives;
        let (bounded, unbounded): (Vec<usize>, Vec<usize>) =
            (0..primitives.len()).partition(|&i| primitives[i].bounding_box().is_finite());

        let root = (!bounded.is_empty()).then(|| BvhNode::build(&primitives, bounded));
        log::debug!(
            "Built a BVH over {} primitives ({} unbounded)",
            primitives.len(),
            unbounded.len()
        );

        Bvh {
            primitives,
            root,
            unbounded,
        }
    }
}

impl Extend<Primitive> for BvhBuilder {
    fn extend<T: IntoIterator<Item = Primitive>>(&mut self, iter: T) {
        self.primitives.extend(iter)
    }
}

/// A bounding volume hierarchy. Unbounded primitives are kept beside the tree and always tested.
#[derive(Debug, Clone, PartialEq)]
pub struct Bvh {
    primitives: Vec<Primitive>,
    root: Option<BvhNode>,
    unbounded: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
struct BvhNode {
    bounding_box: Bounds,
    kind: BvhNodeKind,
}

#[derive(Debug, Clone, PartialEq)]
enum BvhNodeKind {
    Node(Box<BvhNode>, Box<BvhNode>),
    Leaf(usize),
}

impl BvhNode {
    // A top down implementation, `indices` is never empty
    fn build(primitives: &[Primitive], mut indices: Vec<usize>) -> Self {
        let bounding_box = indices
            .iter()
            .map(|&i| primitives[i].bounding_box())
            .reduce(Bounds::union)
            .unwrap_or(Bounds::EMPTY);

        if let [index] = indices[..] {
            return Self {
                bounding_box,
                kind: BvhNodeKind::Leaf(index),
            };
        }

        // Sort by main axis
        let Vec3 { x, y, z } = bounding_box.diag();
        let main_axis: fn(Vec3) -> f32 = if x >= y && x >= z {
            |v| v.x
        } else if y >= z {
            |v| v.y
        } else {
            |v| v.z
        };

        indices.sort_by(|&a, &b| {
            let a = main_axis(primitives[a].bounding_box().centroid().vec());
            let b = main_axis(primitives[b].bounding_box().centroid().vec());
            a.total_cmp(&b)
        });

        // Take half of it in a node, the other half in the other node
        let second_batch = indices.split_off(indices.len() / 2);
        let first_batch = indices;

        Self {
            bounding_box,
            kind: BvhNodeKind::Node(
                Box::new(Self::build(primitives, first_batch)),
                Box::new(Self::build(primitives, second_batch)),
            ),
        }
    }

    fn intersection(&self, primitives: &[Primitive], ray: &Ray) -> IntersectionResult {
        if self.bounding_box.ray_intersect(ray).is_none() {
            return IntersectionResult::NoIntersection;
        }

        match &self.kind {
            BvhNodeKind::Leaf(index) => primitives[*index].intersection(ray),
            BvhNodeKind::Node(a, b) => match a.intersection(primitives, ray) {
                IntersectionResult::Intersection(record) => {
                    let closer = Ray {
                        bounds: (ray.bounds.0, record.t),
                        ..*ray
                    };
                    let second = b.intersection(primitives, &closer);
                    if second.is_intersection() {
                        second
                    } else {
                        IntersectionResult::Intersection(record)
                    }
                }
                IntersectionResult::NoIntersection => b.intersection(primitives, ray),
            },
        }
    }
}

impl Bvh {
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}

impl Shape for Bvh {
    fn intersection(&self, ray: &Ray) -> IntersectionResult {
        let mut closest = self
            .root
            .as_ref()
            .map_or(IntersectionResult::NoIntersection, |root| {
                root.intersection(&self.primitives, ray)
            });

        for &index in &self.unbounded {
            let bounds = (ray.bounds.0, closest.t().unwrap_or(ray.bounds.1));
            let ray = Ray { bounds, ..*ray };
            closest = closest.min(self.primitives[index].intersection(&ray));
        }
        closest
    }

    fn bounding_box(&self) -> Bounds {
        if !self.unbounded.is_empty() {
            Bounds::INFINITE
        } else {
            self.root
                .as_ref()
                .map_or(Bounds::EMPTY, |root| root.bounding_box)
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::{
        aggregate::ShapeList,
        material::MaterialId,
        math::point::Point,
        shape::{InfinitePlane, Sphere},
    };

    fn random_scene(rng: &mut crate::Rng) -> Vec<Primitive> {
        let mut primitives: Vec<_> = (0..64)
            .map(|i| {
                let center = Point::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                );
                let radius = rng.gen_range(0.1..1.5);
                Primitive::Sphere(Sphere::new(center, radius, MaterialId(i)).unwrap())
            })
            .collect();
        primitives.push(Primitive::InfinitePlane(
            InfinitePlane::new(Point::new(0.0, -12.0, 0.0), Vec3::Y, MaterialId(64)).unwrap(),
        ));
        primitives
    }

    #[test]
    fn agrees_with_exhaustive_search() {
        let mut rng = crate::Rng::seed_from_u64(7);
        let primitives = random_scene(&mut rng);

        let list = ShapeList(primitives.clone());
        let mut builder = BvhBuilder::new();
        builder.extend(primitives);
        let bvh = builder.finalize();

        assert_eq!(bvh.primitives().len(), 65);
        assert_eq!(bvh.bounding_box(), Bounds::INFINITE);

        for _ in 0..500 {
            let origin = Point::new(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
            );
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if direction.length_squared() < 1e-3 {
                continue;
            }
            let ray = Ray::new(origin, direction);

            let expected = list.intersection(&ray).into_option();
            let got = bvh.intersection(&ray).into_option();
            assert_eq!(
                expected.map(|r| r.local_info.material),
                got.map(|r| r.local_info.material)
            );
        }
    }

    #[test]
    fn empty_bvh_never_hits() {
        let bvh = BvhBuilder::new().finalize();
        let ray = Ray::new(Point::ORIGIN, Vec3::X);
        assert!(!bvh.intersection(&ray).is_intersection());
        assert_eq!(bvh.bounding_box(), Bounds::EMPTY);
    }
}
