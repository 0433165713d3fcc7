//! Triangle setup and the barycentric coverage test.
//!
//! Screen space has its origin at the top-left with +Y down. Pixels whose
//! centre lies exactly on an edge belong to the triangle only if that edge
//! is a top or left edge, so two triangles sharing an edge never both cover
//! a pixel on it.

use lumen_math::{Vec2, Vec4};

/// Twice the signed area below this is treated as a degenerate triangle.
const AREA_EPSILON: f32 = 1e-8;

/// Why a triangle produced no fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A vertex has `w <= 0`.
    BehindCamera,
    /// Zero (or non-finite) screen-space area.
    Degenerate,
    /// Bounding box does not touch the framebuffer.
    Offscreen,
}

/// Inclusive pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl PixelRect {
    #[inline]
    pub fn contains_row(&self, y: u32) -> bool {
        (self.min_y..=self.max_y).contains(&y)
    }
}

#[inline]
fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Per-triangle data reused by every pixel in its bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleSetup {
    pub vertices: [Vec2; 3],
    /// `v1 - v0`, `v2 - v1`, `v0 - v2`
    pub edges: [Vec2; 3],
    pub total_area: f32,
    pub inv_total_area: f32,
    /// Whether `edges[i]` is a top or left edge.
    pub top_left: [bool; 3],
    pub bounds: PixelRect,
}

impl TriangleSetup {
    /// Set up a triangle from post-divide vertices (`x`, `y` in pixels,
    /// `w` from clip space) for a `width` x `height` target.
    pub fn new(p0: Vec4, p1: Vec4, p2: Vec4, width: u32, height: u32) -> Result<Self, Rejection> {
        if !(p0.w > 0.0 && p1.w > 0.0 && p2.w > 0.0) {
            return Err(Rejection::BehindCamera);
        }

        let vertices = [
            Vec2::new(p0.x, p0.y),
            Vec2::new(p1.x, p1.y),
            Vec2::new(p2.x, p2.y),
        ];
        let edges = [
            vertices[1] - vertices[0],
            vertices[2] - vertices[1],
            vertices[0] - vertices[2],
        ];
        let total_area = cross(edges[0], -edges[2]);
        if !total_area.is_finite() || total_area.abs() < AREA_EPSILON {
            return Err(Rejection::Degenerate);
        }

        let positive = total_area > 0.0;
        let top_left = edges.map(|edge| is_top_left(edge, positive));

        let bounds = pixel_bounds(&vertices, width, height).ok_or(Rejection::Offscreen)?;

        Ok(Self {
            vertices,
            edges,
            total_area,
            inv_total_area: 1.0 / total_area,
            top_left,
            bounds,
        })
    }

    /// Barycentric weights of `point`, or `None` when it is outside.
    ///
    /// Weight `i` belongs to vertex `i` and is the sub-area opposite it
    /// divided by the total area.
    pub fn barycentric(&self, point: Vec2) -> Option<[f32; 3]> {
        let [v0, v1, v2] = self.vertices;
        let [e0, e1, e2] = self.edges;

        // Sub-area opposite v0 lies on edge 1, and so on
        let w0 = cross(e1, point - v1) * self.inv_total_area;
        let w1 = cross(e2, point - v2) * self.inv_total_area;
        let w2 = cross(e0, point - v0) * self.inv_total_area;

        let covers = |w: f32, edge: usize| w > 0.0 || (w == 0.0 && self.top_left[edge]);
        if covers(w0, 1) && covers(w1, 2) && covers(w2, 0) {
            Some([w0, w1, w2])
        } else {
            None
        }
    }
}

/// Top-left test for `edge` (from one vertex to the next) in a +Y down frame.
///
/// For a positive signed area, top edges run in +X and left edges run
/// upwards; a negative area mirrors both.
pub fn is_top_left(edge: Vec2, positive_area: bool) -> bool {
    if positive_area {
        (edge.y == 0.0 && edge.x > 0.0) || edge.y < 0.0
    } else {
        (edge.y == 0.0 && edge.x < 0.0) || edge.y > 0.0
    }
}

/// Pixels whose centres can fall inside the triangle, clamped to the target.
fn pixel_bounds(vertices: &[Vec2; 3], width: u32, height: u32) -> Option<PixelRect> {
    if width == 0 || height == 0 {
        return None;
    }
    let min = vertices[0].min(vertices[1]).min(vertices[2]);
    let max = vertices[0].max(vertices[1]).max(vertices[2]);
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    if max.x < 0.0 || max.y < 0.0 || min.x > width as f32 || min.y > height as f32 {
        return None;
    }

    // Pixel x has its centre at x + 0.5
    let first = |v: f32| (v - 0.5).ceil().max(0.0) as u32;
    let last = |v: f32, limit: u32| ((v - 0.5).floor().max(0.0) as u32).min(limit - 1);

    let rect = PixelRect {
        min_x: first(min.x),
        min_y: first(min.y),
        max_x: last(max.x, width),
        max_y: last(max.y, height),
    };
    (rect.min_x <= rect.max_x && rect.min_y <= rect.max_y).then_some(rect)
}
