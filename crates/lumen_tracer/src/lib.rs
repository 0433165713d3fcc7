//! Whitted-style CPU ray tracer.
//!
//! Spheres, planes, triangles and triangle meshes are intersected with
//! closest-hit semantics, shaded with the shared material/BRDF library and
//! optionally shadowed by any-hit queries towards each light.

pub mod hittable;
pub mod mesh;
pub mod plane;
pub mod renderer;
pub mod scene;
pub mod sphere;
pub mod triangle;

pub use hittable::{CullMode, HitRecord, Hittable};
pub use mesh::TriangleMesh;
pub use plane::Plane;
pub use renderer::{primary_ray, render, render_pixel, shade, FrameStats, RenderConfig};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;
