//! Hittable trait and HitRecord for ray-object intersection.

use lumen_math::{Aabb, Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Record of the closest intersection found so far.
///
/// `t` starts at infinity, so the first in-range hit always wins and later
/// hits only replace it when strictly closer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal as stored on the primitive (not flipped towards the ray)
    pub normal: Vec3,
    pub t: f32,
    pub did_hit: bool,
    pub material_index: usize,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            t: f32::INFINITY,
            did_hit: false,
            material_index: 0,
        }
    }
}

impl HitRecord {
    /// Store a candidate if it is closer than the current one.
    ///
    /// Returns whether the record changed.
    pub fn offer(&mut self, ray: &Ray, t: f32, normal: Vec3, material_index: usize) -> bool {
        if t >= self.t {
            return false;
        }
        self.t = t;
        self.point = ray.at(t);
        self.normal = normal;
        self.material_index = material_index;
        self.did_hit = true;
        true
    }
}

/// Which triangle side is ignored by intersection tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    /// Skip hits where the ray travels against the normal.
    FrontFace,
    /// Skip hits where the ray travels along the normal.
    #[default]
    BackFace,
    /// Both sides are hit.
    None,
}

impl CullMode {
    /// Mode used for shadow queries: front and back swap.
    pub fn inverted(self) -> Self {
        match self {
            CullMode::FrontFace => CullMode::BackFace,
            CullMode::BackFace => CullMode::FrontFace,
            CullMode::None => CullMode::None,
        }
    }

    /// Whether a ray with direction `dir` is culled by a face with `normal`.
    #[inline]
    pub fn culls(self, normal: Vec3, dir: Vec3) -> bool {
        let n_dot_d = normal.dot(dir);
        match self {
            CullMode::FrontFace => n_dot_d < 0.0,
            CullMode::BackFace => n_dot_d > 0.0,
            CullMode::None => false,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest-hit test within `[ray.min, ray.max]`.
    ///
    /// Returns true only if `rec` was updated with a closer hit.
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool;

    /// Any-hit test for shadow rays. Does not need the closest hit.
    fn occludes(&self, ray: &Ray) -> bool {
        let mut rec = HitRecord::default();
        self.hit(ray, &mut rec)
    }

    /// World-space bounds.
    fn bounding_box(&self) -> Aabb;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_empty() {
        let rec = HitRecord::default();
        assert!(!rec.did_hit);
        assert_eq!(rec.t, f32::INFINITY);
    }

    #[test]
    fn test_offer_keeps_closest() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(rec.offer(&ray, 5.0, Vec3::Y, 1));
        assert!(!rec.offer(&ray, 7.0, Vec3::X, 2));
        assert!(!rec.offer(&ray, 5.0, Vec3::X, 2));
        assert_eq!(rec.material_index, 1);

        assert!(rec.offer(&ray, 2.0, Vec3::X, 3));
        assert_eq!(rec.point, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(rec.material_index, 3);
    }

    #[test]
    fn test_cull_mode_inversion() {
        assert_eq!(CullMode::BackFace.inverted(), CullMode::FrontFace);
        assert_eq!(CullMode::FrontFace.inverted(), CullMode::BackFace);
        assert_eq!(CullMode::None.inverted(), CullMode::None);
    }

    #[test]
    fn test_culls() {
        let n = Vec3::NEG_Z;
        // Travelling along -Z hits the back of a face whose normal is -Z
        assert!(CullMode::BackFace.culls(n, Vec3::NEG_Z));
        assert!(!CullMode::BackFace.culls(n, Vec3::Z));
        assert!(CullMode::FrontFace.culls(n, Vec3::Z));
        assert!(!CullMode::None.culls(n, Vec3::Z));
        assert!(!CullMode::None.culls(n, Vec3::NEG_Z));
    }
}
