//! Data and collaborators shared by the rasterizer and the ray tracer:
//! meshes, textures, lights, materials, BRDFs and the framebuffer.

pub mod brdf;
pub mod framebuffer;
pub mod light;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod texture;

pub use framebuffer::Framebuffer;
pub use light::{Light, LightKind};
pub use lighting::LightingMode;
pub use material::Material;
pub use mesh::{Mesh, MeshError, MeshResult, Topology, Vertex};
pub use texture::{SampleFilter, Texture, TextureError, TextureResult};
