use lumen_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    /// Emits from `origin`, falls off with the squared distance.
    Point,
    /// Shines along `direction` with no falloff.
    Directional,
}

/// A light source. `origin` is ignored for directional lights and
/// `direction` for point lights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub kind: LightKind,
    #[serde(default)]
    pub origin: Vec3,
    #[serde(default)]
    pub direction: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    pub fn point(origin: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            kind: LightKind::Point,
            origin,
            direction: Vec3::ZERO,
            color,
            intensity,
        }
    }

    pub fn directional(direction: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            kind: LightKind::Directional,
            origin: Vec3::ZERO,
            direction: direction.normalize_or_zero(),
            color,
            intensity,
        }
    }

    /// Unit direction from `target` towards the light and the distance to it
    /// (`f32::MAX` for directional lights).
    pub fn incident(&self, target: Vec3) -> (Vec3, f32) {
        match self.kind {
            LightKind::Point => {
                let to_light = self.origin - target;
                let distance = to_light.length();
                (to_light.normalize_or_zero(), distance)
            }
            LightKind::Directional => (-self.direction.normalize_or_zero(), f32::MAX),
        }
    }

    /// Radiance arriving at `target`.
    pub fn radiance(&self, target: Vec3) -> Color {
        match self.kind {
            LightKind::Point => {
                let dist_sq = (self.origin - target).length_squared();
                if dist_sq <= f32::EPSILON {
                    return Color::ZERO;
                }
                self.color * (self.intensity / dist_sq)
            }
            LightKind::Directional => self.color * self.intensity,
        }
    }
}
