use crate::{Interval, Vec3};

/// Smallest parametric distance accepted by default.
///
/// Keeps secondary rays from re-hitting the surface they start on.
pub const RAY_MIN: f32 = 0.0001;

/// A ray with a valid parametric range `[min, max]`.
///
/// The direction is not required to be normalized, but `min` and `max` are
/// measured in multiples of its length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub min: f32,
    pub max: f32,
}

impl Ray {
    /// Create a ray spanning `[RAY_MIN, f32::MAX]`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            min: RAY_MIN,
            max: f32::MAX,
        }
    }

    /// Create a ray with an explicit parametric range.
    pub fn with_range(origin: Vec3, direction: Vec3, min: f32, max: f32) -> Self {
        Self {
            origin,
            direction,
            min,
            max,
        }
    }

    /// The valid parametric range as an interval.
    #[inline]
    pub fn range(&self) -> Interval {
        Interval::new(self.min, self.max)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z)
    }
}
