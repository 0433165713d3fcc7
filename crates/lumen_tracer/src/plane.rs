use crate::hittable::{HitRecord, Hittable};
use lumen_math::{Aabb, Interval, Ray, Vec3};

/// Rays this close to parallel with the plane are treated as misses.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Infinite plane through `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Vec3,
    pub normal: Vec3,
    pub material_index: usize,
}

impl Plane {
    pub fn new(origin: Vec3, normal: Vec3, material_index: usize) -> Self {
        Self {
            origin,
            normal: normal.normalize_or_zero(),
            material_index,
        }
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return false;
        }

        let t = (self.origin - ray.origin).dot(self.normal) / denom;
        if !t.is_finite() || !ray.range().contains(t) {
            return false;
        }

        rec.offer(ray, t, self.normal, self.material_index)
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::new(Interval::UNIVERSE, Interval::UNIVERSE, Interval::UNIVERSE)
    }
}
