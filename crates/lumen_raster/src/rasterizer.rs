//! Frame driver: vertex stage, triangle setup, row-parallel fill.

use std::time::{Duration, Instant};

use crate::depth::{depth_test_and_set, DepthBuffer};
use crate::pipeline::{transform_vertices, VertexOut};
use crate::shader::{shade_fragment, Fragment, ShadingMode, TextureSet};
use crate::triangle::{Rejection, TriangleSetup};
use lumen_core::{Light, Mesh, SampleFilter};
use lumen_math::{color, Camera, Color, Vec2, Vec3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// What is written to the colour buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Shaded,
    /// Depth remapped to gray
    Depth,
}

impl DisplayMode {
    pub fn toggle(self) -> Self {
        match self {
            DisplayMode::Shaded => DisplayMode::Depth,
            DisplayMode::Depth => DisplayMode::Shaded,
        }
    }
}

/// Rasterizer configuration, passed to every [`Rasterizer::render`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    pub shading_mode: ShadingMode,
    pub normal_mapping: bool,
    pub display: DisplayMode,
    pub filter: SampleFilter,
    pub lights: Vec<Light>,
    /// Phong exponent at full gloss
    pub shininess: f32,
    pub ambient: Color,
    /// Depth mapped to black in the depth view; 1.0 maps to white
    pub depth_remap_min: f32,
    pub clear_color: Color,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            shading_mode: ShadingMode::Combined,
            normal_mapping: true,
            display: DisplayMode::Shaded,
            filter: SampleFilter::Point,
            lights: vec![Light::directional(Vec3::new(0.577, -0.577, 0.577), 7.0, Color::ONE)],
            shininess: 25.0,
            ambient: Color::splat(0.025),
            depth_remap_min: 0.985,
            clear_color: Color::splat(100.0 / 255.0),
        }
    }
}

impl RasterConfig {
    pub fn toggle_normal_mapping(&mut self) {
        self.normal_mapping = !self.normal_mapping;
    }

    pub fn toggle_display(&mut self) {
        self.display = self.display.toggle();
    }

    pub fn cycle_shading_mode(&mut self) {
        self.shading_mode = self.shading_mode.cycle();
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.cycle();
    }
}

/// A mesh together with the maps used to shade it.
#[derive(Debug, Clone)]
pub struct Model {
    pub mesh: Mesh,
    pub textures: TextureSet,
}

impl Model {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            textures: TextureSet::default(),
        }
    }

    pub fn with_textures(mut self, textures: TextureSet) -> Self {
        self.textures = textures;
        self
    }
}

/// Per-frame statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub triangles: usize,
    pub culled_behind_camera: usize,
    pub degenerate: usize,
    pub offscreen: usize,
    pub fragments_written: usize,
    pub elapsed: Duration,
}

/// A triangle ready for the fill stage.
struct SetupTriangle<'a> {
    setup: TriangleSetup,
    vertices: [VertexOut; 3],
    textures: &'a TextureSet,
}

/// Software rasterizer. Owns the depth buffer.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    depth: DepthBuffer,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            depth: DepthBuffer::new(0, 0),
        }
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth
    }

    /// Draw `models` into `framebuffer`.
    ///
    /// The framebuffer is cleared to `config.clear_color` and the depth
    /// buffer to infinity first. Triangles are drawn in submission order, so
    /// the output does not depend on thread scheduling.
    pub fn render(
        &mut self,
        models: &[Model],
        camera: &Camera,
        config: &RasterConfig,
        framebuffer: &mut lumen_core::Framebuffer,
    ) -> FrameStats {
        let start = Instant::now();
        let (width, height) = (framebuffer.width, framebuffer.height);

        framebuffer.clear(config.clear_color);
        self.depth.resize(width, height);
        self.depth.clear();

        let mut stats = FrameStats::default();
        let mut triangles = Vec::new();

        for model in models {
            let mesh = &model.mesh;
            let vertices_out = transform_vertices(&mesh.vertices, mesh.world_matrix(), camera, width, height);

            for [i0, i1, i2] in mesh.triangles() {
                stats.triangles += 1;
                let vertices = [
                    vertices_out[i0 as usize],
                    vertices_out[i1 as usize],
                    vertices_out[i2 as usize],
                ];
                match TriangleSetup::new(vertices[0].position, vertices[1].position, vertices[2].position, width, height) {
                    Ok(setup) => triangles.push(SetupTriangle {
                        setup,
                        vertices,
                        textures: &model.textures,
                    }),
                    Err(Rejection::BehindCamera) => stats.culled_behind_camera += 1,
                    Err(Rejection::Degenerate) => stats.degenerate += 1,
                    Err(Rejection::Offscreen) => stats.offscreen += 1,
                }
            }
        }

        if width > 0 && height > 0 {
            stats.fragments_written = framebuffer
                .pixels
                .par_chunks_mut(width as usize)
                .zip(self.depth.depths.par_chunks_mut(width as usize))
                .enumerate()
                .map(|(y, (color_row, depth_row))| fill_row(y as u32, &triangles, config, color_row, depth_row))
                .sum();
        }

        stats.elapsed = start.elapsed();
        log::debug!(
            "Rasterized {} triangles ({} behind camera, {} degenerate, {} offscreen), {} fragments in {:.2?}",
            stats.triangles,
            stats.culled_behind_camera,
            stats.degenerate,
            stats.offscreen,
            stats.fragments_written,
            stats.elapsed
        );
        stats
    }
}

/// Fill one framebuffer row with every triangle that overlaps it.
fn fill_row(
    y: u32,
    triangles: &[SetupTriangle<'_>],
    config: &RasterConfig,
    color_row: &mut [[u8; 4]],
    depth_row: &mut [f32],
) -> usize {
    let mut written = 0;
    let py = y as f32 + 0.5;

    for triangle in triangles.iter().filter(|t| t.setup.bounds.contains_row(y)) {
        let bounds = triangle.setup.bounds;
        for x in bounds.min_x..=bounds.max_x {
            let Some(weights) = triangle.setup.barycentric(Vec2::new(x as f32 + 0.5, py)) else {
                continue;
            };
            let Some(fragment) = Fragment::interpolate(&triangle.vertices, weights) else {
                continue;
            };
            if !depth_test_and_set(&mut depth_row[x as usize], fragment.depth) {
                continue;
            }

            let rgb = match config.display {
                DisplayMode::Shaded => shade_fragment(&fragment, triangle.textures, config),
                DisplayMode::Depth => Color::splat(color::remap(fragment.depth, config.depth_remap_min, 1.0)),
            };
            color_row[x as usize] = color::to_rgba8(rgb);
            written += 1;
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{Framebuffer, Topology, Vertex};
    use lumen_math::Transform;

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, -10.0), 60.0, 1.0)
    }

    fn flat_config() -> RasterConfig {
        // Light along +Z onto faces looking at -Z, no ambient, observed area
        RasterConfig {
            shading_mode: ShadingMode::ObservedArea,
            lights: vec![Light::directional(Vec3::Z, 1.0, Color::ONE)],
            ambient: Color::ZERO,
            clear_color: Color::ZERO,
            ..Default::default()
        }
    }

    fn quad_model(z: f32, size: f32, color: Color) -> Model {
        let mut mesh = Mesh::quad(size).with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, z)));
        for v in &mut mesh.vertices {
            v.color = color;
        }
        Model::new(mesh)
    }

    #[test]
    fn test_quad_covers_center() {
        let mut fb = Framebuffer::new(32, 32);
        let mut rasterizer = Rasterizer::new();
        let stats = rasterizer.render(&[quad_model(0.0, 4.0, Color::ONE)], &camera(), &flat_config(), &mut fb);

        assert_eq!(stats.triangles, 2);
        assert!(stats.fragments_written > 0);
        let [r, g, b, _] = fb.pixel(16, 16).unwrap();
        assert!(r > 250 && g > 250 && b > 250);
        assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 255]));
        assert!(rasterizer.depth_buffer().get(16, 16).unwrap() < 1.0);
    }

    #[test]
    fn test_fragment_count_matches_depth_coverage() {
        let mut fb = Framebuffer::new(32, 32);
        let mut rasterizer = Rasterizer::new();
        let config = RasterConfig {
            display: DisplayMode::Depth,
            ..flat_config()
        };
        let stats = rasterizer.render(&[quad_model(0.0, 4.0, Color::ONE)], &camera(), &config, &mut fb);

        // Every covered pixel is written exactly once
        let covered = rasterizer
            .depth_buffer()
            .depths
            .iter()
            .filter(|d| d.is_finite())
            .count();
        assert_eq!(stats.fragments_written, covered);
    }

    #[test]
    fn test_nearer_triangle_wins_regardless_of_order() {
        let near = quad_model(-2.0, 4.0, Color::new(1.0, 0.0, 0.0));
        let far = quad_model(3.0, 4.0, Color::new(0.0, 0.0, 1.0));
        let mut config = flat_config();
        config.shading_mode = ShadingMode::Diffuse;
        config.lights = vec![Light::directional(Vec3::Z, std::f32::consts::PI, Color::ONE)];

        for models in [[near.clone(), far.clone()], [far.clone(), near.clone()]] {
            let mut fb = Framebuffer::new(16, 16);
            Rasterizer::new().render(&models, &camera(), &config, &mut fb);
            let [r, g, b, _] = fb.pixel(8, 8).unwrap();
            assert!(r > 250);
            assert_eq!((g, b), (0, 0));
        }
    }

    #[test]
    fn test_behind_camera_rejected() {
        let behind = quad_model(-20.0, 4.0, Color::ONE);
        let mut fb = Framebuffer::new(16, 16);
        let stats = Rasterizer::new().render(&[behind], &camera(), &flat_config(), &mut fb);

        assert_eq!(stats.culled_behind_camera, 2);
        assert_eq!(stats.fragments_written, 0);
        assert!(fb.pixels.iter().all(|p| *p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_degenerate_triangle_counted() {
        let vertices = vec![
            Vertex::new(Vec3::ZERO),
            Vertex::new(Vec3::X),
            Vertex::new(Vec3::X * 2.0),
        ];
        let mesh = Mesh::new(vertices, vec![0, 1, 2], Topology::TriangleList);
        let mut fb = Framebuffer::new(16, 16);
        let stats = Rasterizer::new().render(&[Model::new(mesh)], &camera(), &flat_config(), &mut fb);
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.fragments_written, 0);
    }

    #[test]
    fn test_depth_display_is_gray() {
        let mut config = flat_config();
        config.display = DisplayMode::Depth;
        config.depth_remap_min = 0.0;
        let mut fb = Framebuffer::new(16, 16);
        Rasterizer::new().render(&[quad_model(0.0, 4.0, Color::ONE)], &camera(), &config, &mut fb);

        let [r, g, b, _] = fb.pixel(8, 8).unwrap();
        assert!(r == g && g == b);
        assert!(r > 0);
    }

    #[test]
    fn test_depth_buffer_cleared_between_frames() {
        let mut rasterizer = Rasterizer::new();
        let mut fb = Framebuffer::new(16, 16);
        let model = [quad_model(0.0, 4.0, Color::ONE)];
        let first = rasterizer.render(&model, &camera(), &flat_config(), &mut fb);
        let second = rasterizer.render(&model, &camera(), &flat_config(), &mut fb);
        assert_eq!(first.fragments_written, second.fragments_written);
    }

    #[test]
    fn test_config_from_json() {
        let config: RasterConfig =
            serde_json::from_str(r#"{"shading_mode": "specular", "filter": "linear", "normal_mapping": false}"#).unwrap();
        assert_eq!(config.shading_mode, ShadingMode::Specular);
        assert_eq!(config.filter, SampleFilter::Linear);
        assert!(!config.normal_mapping);
        assert_eq!(config.lights.len(), 1);
        assert_eq!(config.shininess, 25.0);
    }

    #[test]
    fn test_config_toggles() {
        let mut config = RasterConfig::default();
        config.toggle_display();
        config.toggle_normal_mapping();
        config.cycle_filter();
        config.cycle_shading_mode();
        assert_eq!(config.display, DisplayMode::Depth);
        assert!(!config.normal_mapping);
        assert_eq!(config.filter, SampleFilter::Linear);
        assert_eq!(config.shading_mode, ShadingMode::ObservedArea);
    }
}
