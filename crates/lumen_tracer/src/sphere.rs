//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use lumen_math::{Aabb, Ray, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material_index: usize,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material_index: usize) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material_index,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 || a == 0.0 {
            return false;
        }
        let sqrtd = discriminant.sqrt();

        // Near root first, the far one only when the near one is out of range
        let range = ray.range();
        let mut t = (-half_b - sqrtd) / a;
        if !range.contains(t) {
            t = (-half_b + sqrtd) / a;
            if !range.contains(t) {
                return false;
            }
        }

        let normal = (ray.at(t) - self.center).normalize_or_zero();
        rec.offer(ray, t, normal, self.material_index)
    }

    fn bounding_box(&self) -> Aabb {
        let r = Vec3::splat(self.radius);
        Aabb::from_points(self.center - r, self.center + r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit_through_center() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, 0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!((rec.point - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_near_root_is_d_minus_r() {
        let sphere = Sphere::new(Vec3::ZERO, 2.5, 0);
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_X);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, &mut rec));
        assert!((rec.t - 7.5).abs() < 1e-4);
        // Normal parallel to the ray direction
        assert!(rec.normal.cross(ray.direction).length() < 1e-5);
    }

    #[test]
    fn test_inside_sphere_uses_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, 0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, 0);
        let ray = Ray::new(Vec3::new(0.0, 2.0, -5.0), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, &mut rec));
        assert!(!rec.did_hit);
    }

    #[test]
    fn test_sphere_respects_ray_max() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, 0);
        let ray = Ray::with_range(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, 0.0001, 3.0);
        assert!(!sphere.occludes(&ray));
    }

    #[test]
    fn test_farther_sphere_does_not_replace_closer_hit() {
        let near = Sphere::new(Vec3::new(0.0, 0.0, 0.0), 1.0, 1);
        let far = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 2);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(near.hit(&ray, &mut rec));
        assert!(!far.hit(&ray, &mut rec));
        assert_eq!(rec.material_index, 1);
    }
}
