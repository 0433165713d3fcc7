//! Linear RGB color helpers.

use crate::Vec3;

/// Color type alias (linear RGB, nominally 0-1 per channel).
pub type Color = Vec3;

pub const BLACK: Color = Color::ZERO;
pub const WHITE: Color = Color::ONE;
pub const RED: Color = Color::new(1.0, 0.0, 0.0);
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
pub const GRAY: Color = Color::new(0.5, 0.5, 0.5);

/// Gray color with every channel set to `value`.
#[inline]
pub fn gray(value: f32) -> Color {
    Color::splat(value)
}

/// Rescale so the largest channel is at most 1, preserving hue.
///
/// Colors already in range are returned unchanged.
pub fn max_to_one(color: Color) -> Color {
    let max = color.max_element();
    if max > 1.0 {
        color / max
    } else {
        color
    }
}

/// Convert to 8-bit RGBA after `max_to_one`. Negative channels become 0.
pub fn to_rgba8(color: Color) -> [u8; 4] {
    let c = max_to_one(color).clamp(Color::ZERO, Color::ONE) * 255.0;
    [c.x as u8, c.y as u8, c.z as u8, 255]
}

/// Linearly remap `value` from `[min, max]` to `[0, 1]`, clamped.
pub fn remap(value: f32, min: f32, max: f32) -> f32 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}
