//! Whitted-style shading: one primary ray per pixel, direct lighting from
//! every light, optional hard shadows.

use std::time::{Duration, Instant};

use crate::hittable::HitRecord;
use crate::scene::Scene;
use lumen_core::{Framebuffer, LightingMode};
use lumen_math::{color, Color, Ray, Vec3, RAY_MIN};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Cast shadow rays towards each light
    pub shadows: bool,
    pub lighting_mode: LightingMode,
    /// Offset along the normal for shadow ray origins
    pub shadow_bias: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shadows: false,
            lighting_mode: LightingMode::Combined,
            shadow_bias: 1e-4,
        }
    }
}

impl RenderConfig {
    pub fn toggle_shadows(&mut self) {
        self.shadows = !self.shadows;
    }

    pub fn cycle_lighting_mode(&mut self) {
        self.lighting_mode = self.lighting_mode.cycle();
    }
}

/// Per-frame statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub pixels: usize,
    pub primary_hits: usize,
    pub elapsed: Duration,
}

/// Primary ray through the centre of pixel `(px, py)`.
pub fn primary_ray(scene: &Scene, px: u32, py: u32, width: u32, height: u32) -> Ray {
    let camera = &scene.camera;
    let aspect_ratio = width as f32 / height as f32;

    let cx = (2.0 * (px as f32 + 0.5) / width as f32 - 1.0) * aspect_ratio * camera.fov;
    let cy = (1.0 - 2.0 * (py as f32 + 0.5) / height as f32) * camera.fov;
    let direction = camera
        .camera_to_world()
        .transform_vector3(Vec3::new(cx, cy, 1.0).normalize());

    Ray::new(camera.origin, direction)
}

/// Direct lighting at a hit seen along `view_ray`.
pub fn shade(scene: &Scene, config: &RenderConfig, view_ray: &Ray, hit: &HitRecord) -> Color {
    let material = scene.material(hit.material_index);
    let to_viewer = -view_ray.direction.normalize_or_zero();
    let mut color = Color::ZERO;

    for light in &scene.lights {
        let (to_light, distance) = light.incident(hit.point);
        let cosine = hit.normal.dot(to_light);
        if cosine <= 0.0 {
            continue;
        }

        // `distance` is f32::MAX for directional lights
        if config.shadows {
            let origin = hit.point + hit.normal * config.shadow_bias;
            let shadow_ray = Ray::with_range(origin, to_light, RAY_MIN, distance);
            if scene.does_hit(&shadow_ray) {
                continue;
            }
        }

        let brdf = material.shade(hit.normal, to_light, to_viewer);
        color += config
            .lighting_mode
            .combine(cosine, light.radiance(hit.point), brdf);
    }

    color
}

/// Colour of one pixel and whether its primary ray hit anything.
pub fn render_pixel(scene: &Scene, config: &RenderConfig, px: u32, py: u32, width: u32, height: u32) -> (Color, bool) {
    let ray = primary_ray(scene, px, py, width, height);
    let mut rec = HitRecord::default();
    if !scene.closest_hit(&ray, &mut rec) {
        return (Color::ZERO, false);
    }
    (shade(scene, config, &ray, &rec), true)
}

/// Render the scene into `framebuffer`, one rayon task per row.
///
/// The camera matrices are used as they are; call
/// `calculate_view_matrix` after moving the camera.
pub fn render(scene: &Scene, config: &RenderConfig, framebuffer: &mut Framebuffer) -> FrameStats {
    let start = Instant::now();
    let (width, height) = (framebuffer.width, framebuffer.height);
    if width == 0 || height == 0 {
        return FrameStats::default();
    }

    let primary_hits: usize = framebuffer
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .map(|(py, row)| {
            let mut hits = 0;
            for (px, pixel) in row.iter_mut().enumerate() {
                let (rgb, hit) = render_pixel(scene, config, px as u32, py as u32, width, height);
                *pixel = color::to_rgba8(rgb);
                hits += hit as usize;
            }
            hits
        })
        .sum();

    let stats = FrameStats {
        pixels: width as usize * height as usize,
        primary_hits,
        elapsed: start.elapsed(),
    };
    log::debug!(
        "Traced {}x{} ({} primary hits) in {:.2?}",
        width,
        height,
        stats.primary_hits,
        stats.elapsed
    );
    stats
}
