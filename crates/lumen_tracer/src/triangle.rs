//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::hittable::{CullMode, HitRecord, Hittable};
use lumen_math::{Aabb, Ray, Vec3};

/// Determinants below this are treated as a ray parallel to the triangle.
const DETERMINANT_EPSILON: f32 = 1e-8;

/// Möller-Trumbore test against triangle `(v0, v1, v2)` with face `normal`.
///
/// Returns `t` when the ray hits inside `[ray.min, ray.max]` and the face is
/// not culled.
pub fn intersect(v0: Vec3, v1: Vec3, v2: Vec3, normal: Vec3, cull_mode: CullMode, ray: &Ray) -> Option<f32> {
    if cull_mode.culls(normal, ray.direction) {
        return None;
    }

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < DETERMINANT_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    ray.range().contains(t).then_some(t)
}

/// A single triangle primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Unit face normal, `(v1 - v0) × (v2 - v0)`
    pub normal: Vec3,
    pub cull_mode: CullMode,
    pub material_index: usize,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, cull_mode: CullMode, material_index: usize) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self {
            v0,
            v1,
            v2,
            normal,
            cull_mode,
            material_index,
        }
    }

    pub fn with_normal(
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        normal: Vec3,
        cull_mode: CullMode,
        material_index: usize,
    ) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal: normal.normalize_or_zero(),
            cull_mode,
            material_index,
        }
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        match intersect(self.v0, self.v1, self.v2, self.normal, self.cull_mode, ray) {
            Some(t) => rec.offer(ray, t, self.normal, self.material_index),
            None => false,
        }
    }

    fn occludes(&self, ray: &Ray) -> bool {
        intersect(self.v0, self.v1, self.v2, self.normal, self.cull_mode.inverted(), ray).is_some()
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::enclosing(&[self.v0, self.v1, self.v2])
    }
}
