use crate::{Interval, Mat4, Ray, Vec3};

/// Axis-Aligned Bounding Box used to prune ray-mesh tests.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));
        Self::new(x, y, z)
    }

    /// Create the smallest AABB enclosing every point.
    ///
    /// Returns `Aabb::EMPTY` for an empty slice.
    pub fn enclosing(points: &[Vec3]) -> Self {
        if points.is_empty() {
            return Self::EMPTY;
        }

        let mut aabb = Self::EMPTY;
        for &point in points {
            aabb.encapsulate(point);
        }
        aabb.pad_to_minimums();
        aabb
    }

    /// Grow the box so it contains `point`.
    pub fn encapsulate(&mut self, point: Vec3) {
        self.x = self.x.include(point.x);
        self.y = self.y.include(point.y);
        self.z = self.z.include(point.z);
    }

    /// Minimum corner.
    pub fn min_point(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Maximum corner.
    pub fn max_point(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Returns true if the box has not enclosed any point yet.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// Returns true if `point` lies inside the box (inclusive).
    pub fn contains(&self, point: Vec3) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y) && self.z.contains(point.z)
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Bounding box of this box after `transform`.
    ///
    /// All 8 corners are transformed, so the result encloses every point the
    /// original box enclosed.
    pub fn transformed(&self, transform: &Mat4) -> Aabb {
        if self.is_empty() {
            return Self::EMPTY;
        }

        let min = self.min_point();
        let max = self.max_point();
        let mut result = Self::EMPTY;

        for corner in 0..8 {
            let point = Vec3::new(
                if corner & 1 == 0 { min.x } else { max.x },
                if corner & 2 == 0 { min.y } else { max.y },
                if corner & 4 == 0 { min.z } else { max.z },
            );
            result.encapsulate(transform.transform_point3(point));
        }

        result.pad_to_minimums();
        result
    }

    /// Test if a ray overlaps this AABB anywhere inside `[ray.min, ray.max]`.
    ///
    /// Uses the slab method: each axis narrows the parametric interval and the
    /// ray misses as soon as the interval becomes empty.
    pub fn hit(&self, ray: &Ray) -> bool {
        let mut ray_t = ray.range();

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / ray.direction[axis];
            let origin = ray.origin[axis];

            let mut t0 = (slab.min - origin) * adinv;
            let mut t1 = (slab.max - origin) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            // f32::max/min ignore NaN, which covers a zero direction component
            // whose origin sits exactly on a slab boundary.
            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max < ray_t.min {
                return false;
            }
        }

        true
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min_point() + self.max_point()) * 0.5
    }

    /// Pad intervals to avoid zero-width AABBs (flat meshes).
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.min_point(), Vec3::ZERO);
        assert_eq!(aabb.max_point(), Vec3::splat(10.0));
    }

    #[test]
    fn test_aabb_enclosing() {
        let points = [
            Vec3::new(-1.0, 2.0, 0.5),
            Vec3::new(3.0, -4.0, 1.0),
            Vec3::new(0.0, 0.0, -2.0),
        ];
        let aabb = Aabb::enclosing(&points);

        assert_eq!(aabb.min_point(), Vec3::new(-1.0, -4.0, -2.0));
        assert_eq!(aabb.max_point(), Vec3::new(3.0, 2.0, 1.0));
        for point in points {
            assert!(aabb.contains(point));
        }
    }

    #[test]
    fn test_aabb_enclosing_empty() {
        assert!(Aabb::enclosing(&[]).is_empty());
    }

    #[test]
    fn test_flat_aabb_is_padded() {
        let aabb = Aabb::enclosing(&[Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0)]);
        assert!(aabb.y.size() > 0.0);

        // A ray hitting the flat box head-on must still overlap it
        let ray = Ray::new(Vec3::new(0.5, 5.0, 0.5), Vec3::new(0.0, -1.0, 0.0));
        assert!(aabb.hit(&ray));
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!aabb.hit(&ray));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!aabb.hit(&ray));
    }

    #[test]
    fn test_aabb_hit_respects_ray_max() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray = Ray::with_range(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, 0.0001, 3.0);

        assert!(!aabb.hit(&ray));
    }

    #[test]
    fn test_aabb_transformed_encloses_rotated_corners() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        let transform = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4);
        let transformed = aabb.transformed(&transform);

        for corner in [Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::ONE] {
            let p = transform.transform_point3(corner);
            assert!(transformed.contains(p), "{p:?} not enclosed");
        }
    }

    #[test]
    fn test_aabb_transformed_translation() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        let transformed = aabb.transformed(&Mat4::from_translation(Vec3::splat(5.0)));

        assert!((transformed.min_point() - Vec3::splat(5.0)).length() < 0.001);
        assert!((transformed.max_point() - Vec3::splat(6.0)).length() < 0.001);
    }

    #[test]
    fn test_aabb_centroid() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
        assert_eq!(aabb.centroid(), Vec3::splat(5.0));
    }
}
