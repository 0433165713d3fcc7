// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod camera;
mod interval;
mod ray;
mod transform;

pub mod color;

pub use aabb::Aabb;
pub use camera::Camera;
pub use color::Color;
pub use interval::Interval;
pub use ray::{Ray, RAY_MIN};
pub use transform::Transform;
