//! Software triangle rasterizer.
//!
//! Meshes go through a vertex stage (`projection * view * world`,
//! perspective divide, screen mapping), per-triangle setup, a barycentric
//! coverage test with the top-left fill rule, a strict less-than depth test
//! and per-pixel Lambert/Phong shading with optional texture maps.

pub mod depth;
pub mod pipeline;
pub mod rasterizer;
pub mod shader;
pub mod triangle;

pub use depth::DepthBuffer;
pub use pipeline::{transform_vertices, VertexOut};
pub use rasterizer::{DisplayMode, FrameStats, Model, RasterConfig, Rasterizer};
pub use shader::{shade_fragment, Fragment, ShadingMode, TextureSet};
pub use triangle::{Rejection, TriangleSetup};
