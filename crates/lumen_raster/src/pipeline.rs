//! Vertex stage: model space to screen space.

use lumen_core::Vertex;
use lumen_math::{Camera, Color, Mat4, Vec2, Vec3, Vec4};

/// A vertex after the vertex stage.
///
/// `position` holds screen-space `x`/`y` in pixels (origin top-left), the
/// NDC depth in `z` and the clip-space `w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOut {
    pub position: Vec4,
    pub color: Color,
    pub uv: Vec2,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub world_position: Vec3,
    /// Unit vector from the camera to the vertex
    pub view_direction: Vec3,
}

impl VertexOut {
    #[inline]
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.y)
    }

    /// In front of the camera. A `w` of zero or NaN counts as behind.
    #[inline]
    pub fn is_in_front(&self) -> bool {
        self.position.w > 0.0
    }
}

/// NDC `x`/`y` in `[-1, 1]` to pixel coordinates, flipping Y.
#[inline]
pub fn ndc_to_screen(ndc: Vec2, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * width as f32,
        (1.0 - ndc.y) * 0.5 * height as f32,
    )
}

/// Transform every vertex with `projection * view * world`.
///
/// Normals and tangents only see the world matrix. Vertices behind the
/// camera keep their raw clip values; the triangle stage rejects them.
pub fn transform_vertices(
    vertices: &[Vertex],
    world: Mat4,
    camera: &Camera,
    width: u32,
    height: u32,
) -> Vec<VertexOut> {
    let world_view_projection = camera.projection_matrix * camera.view_matrix * world;

    vertices
        .iter()
        .map(|vertex| {
            let clip = world_view_projection * vertex.position.extend(1.0);
            let world_position = world.transform_point3(vertex.position);

            let ndc = clip.truncate() / clip.w;
            let screen = ndc_to_screen(Vec2::new(ndc.x, ndc.y), width, height);

            VertexOut {
                position: Vec4::new(screen.x, screen.y, ndc.z, clip.w),
                color: vertex.color,
                uv: vertex.uv,
                normal: world.transform_vector3(vertex.normal).normalize_or_zero(),
                tangent: world.transform_vector3(vertex.tangent).normalize_or_zero(),
                world_position,
                view_direction: (world_position - camera.origin).normalize_or_zero(),
            }
        })
        .collect()
}
