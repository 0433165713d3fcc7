// World transform composed from scale, rotation and translation.
//
// The composition order is fixed: scale first, then rotate, then translate.
// In glam's column-vector convention that is `T * R * S`.

use glam::{Mat4, Quat, Vec3};

/// Transform components that can be composed into a world matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: Vec3,
    pub rotation: Quat,
    pub translation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: Vec3::ONE,
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
    };

    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Create a new transform rotating around +Y by `yaw` radians.
    pub fn from_rotation_y(yaw: f32) -> Self {
        Self {
            rotation: Quat::from_rotation_y(yaw),
            ..Self::IDENTITY
        }
    }

    /// Convert to a 4x4 world matrix (scale, then rotate, then translate).
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Transform a point into world space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.to_matrix().transform_point3(point)
    }

    /// Transform a direction (normal, tangent) into world space and renormalize.
    ///
    /// Translation does not affect directions.
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.to_matrix()
            .transform_vector3(direction)
            .normalize_or_zero()
    }
}
