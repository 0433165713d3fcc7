//! Attribute interpolation and per-pixel shading.

use std::sync::Arc;

use crate::pipeline::VertexOut;
use crate::rasterizer::RasterConfig;
use lumen_core::{brdf, Texture};
use lumen_math::{Color, Mat3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Which lighting term is written for each fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    /// Lambert cosine only.
    ObservedArea,
    /// Lit diffuse term.
    Diffuse,
    /// Phong highlight only.
    Specular,
    /// Diffuse plus specular, plus ambient.
    #[default]
    Combined,
}

impl ShadingMode {
    pub fn cycle(self) -> Self {
        match self {
            ShadingMode::ObservedArea => ShadingMode::Diffuse,
            ShadingMode::Diffuse => ShadingMode::Specular,
            ShadingMode::Specular => ShadingMode::Combined,
            ShadingMode::Combined => ShadingMode::ObservedArea,
        }
    }

    fn combine(self, cosine: f32, radiance: Color, diffuse: Color, specular: Color) -> Color {
        match self {
            ShadingMode::ObservedArea => Color::splat(cosine),
            ShadingMode::Diffuse => radiance * diffuse * cosine,
            ShadingMode::Specular => specular * cosine,
            ShadingMode::Combined => (radiance * diffuse + specular) * cosine,
        }
    }
}

/// Optional texture maps of a model. Missing maps are skipped when shading.
#[derive(Debug, Clone, Default)]
pub struct TextureSet {
    pub diffuse: Option<Arc<Texture>>,
    pub normal: Option<Arc<Texture>>,
    /// Gray map scaling the Phong lobe
    pub specular: Option<Arc<Texture>>,
    /// Gray map scaling the shininess exponent
    pub gloss: Option<Arc<Texture>>,
}

/// Interpolated attributes at one covered pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// Non-linear depth in `[0, 1]`
    pub depth: f32,
    pub color: Color,
    pub uv: Vec2,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub world_position: Vec3,
    pub view_direction: Vec3,
}

impl Fragment {
    /// Interpolate a triangle's attributes with barycentric `weights`.
    ///
    /// Depth is `1 / Σ(wᵢ / zᵢ)`; UV is perspective-correct through the
    /// clip-space `w`. Everything else is interpolated linearly in screen
    /// space. Returns `None` when the depth falls outside `[0, 1]`.
    pub fn interpolate(vertices: &[VertexOut; 3], weights: [f32; 3]) -> Option<Self> {
        let [a, b, c] = vertices;
        let [w0, w1, w2] = weights;

        let depth = 1.0 / (w0 / a.position.z + w1 / b.position.z + w2 / c.position.z);
        if !(0.0..=1.0).contains(&depth) {
            return None;
        }

        let w_depth = 1.0 / (w0 / a.position.w + w1 / b.position.w + w2 / c.position.w);
        let uv = (a.uv / a.position.w * w0 + b.uv / b.position.w * w1 + c.uv / c.position.w * w2) * w_depth;

        let lerp3 = |x: Vec3, y: Vec3, z: Vec3| x * w0 + y * w1 + z * w2;
        Some(Self {
            depth,
            color: lerp3(a.color, b.color, c.color),
            uv,
            normal: lerp3(a.normal, b.normal, c.normal).normalize_or_zero(),
            tangent: lerp3(a.tangent, b.tangent, c.tangent).normalize_or_zero(),
            world_position: lerp3(a.world_position, b.world_position, c.world_position),
            view_direction: lerp3(a.view_direction, b.view_direction, c.view_direction).normalize_or_zero(),
        })
    }
}

/// Surface normal after optional normal mapping.
fn shading_normal(fragment: &Fragment, textures: &TextureSet, config: &RasterConfig) -> Vec3 {
    let normal = fragment.normal;
    let Some(map) = textures.normal.as_deref().filter(|_| config.normal_mapping) else {
        return normal;
    };

    let tangent = fragment.tangent;
    let binormal = normal.cross(tangent);
    let tangent_space = Mat3::from_cols(tangent, binormal, normal);
    let sampled = map.sample_normal(fragment.uv, config.filter);
    (tangent_space * sampled).try_normalize().unwrap_or(normal)
}

/// Lambert + Phong over every configured light.
pub fn shade_fragment(fragment: &Fragment, textures: &TextureSet, config: &RasterConfig) -> Color {
    let uv = fragment.uv;
    let filter = config.filter;

    let albedo = textures
        .diffuse
        .as_deref()
        .map_or(fragment.color, |map| map.sample_filtered(uv, filter));
    let normal = shading_normal(fragment, textures, config);
    let ks = textures.specular.as_deref().map_or(0.0, |map| map.sample_gray(uv, filter));
    let exponent = textures.gloss.as_deref().map_or(1.0, |map| map.sample_gray(uv, filter)) * config.shininess;

    let to_viewer = -fragment.view_direction;
    let diffuse = brdf::lambert(1.0, albedo);

    let mut color = Color::ZERO;
    for light in &config.lights {
        let (to_light, _) = light.incident(fragment.world_position);
        let cosine = normal.dot(to_light);
        if cosine <= 0.0 {
            continue;
        }
        let specular = brdf::phong(ks, exponent, to_light, to_viewer, normal);
        color += config
            .shading_mode
            .combine(cosine, light.radiance(fragment.world_position), diffuse, specular);
    }

    if config.shading_mode == ShadingMode::Combined {
        color += config.ambient;
    }
    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::Light;
    use lumen_math::Vec4;
    use std::f32::consts::PI;

    fn vertex(x: f32, y: f32, z: f32, w: f32, uv: Vec2) -> VertexOut {
        VertexOut {
            position: Vec4::new(x, y, z, w),
            color: Color::ONE,
            uv,
            normal: Vec3::NEG_Z,
            tangent: Vec3::X,
            world_position: Vec3::ZERO,
            view_direction: Vec3::Z,
        }
    }

    fn triangle() -> [VertexOut; 3] {
        [
            vertex(0.0, 0.0, 0.9, 2.0, Vec2::new(0.0, 0.0)),
            vertex(10.0, 0.0, 0.95, 5.0, Vec2::new(1.0, 0.0)),
            vertex(0.0, 10.0, 0.99, 20.0, Vec2::new(0.0, 1.0)),
        ]
    }

    /// Light straight into the surface, shading with no ambient.
    fn config(mode: ShadingMode) -> RasterConfig {
        RasterConfig {
            shading_mode: mode,
            lights: vec![Light::directional(Vec3::Z, 2.0, Color::ONE)],
            ambient: Color::ZERO,
            ..Default::default()
        }
    }

    #[test]
    fn test_uv_reproduced_at_vertices() {
        let tri = triangle();
        for (i, expected) in tri.iter().enumerate() {
            let mut weights = [0.0; 3];
            weights[i] = 1.0;
            let fragment = Fragment::interpolate(&tri, weights).unwrap();
            assert!((fragment.uv - expected.uv).length() < 1e-5);
            assert!((fragment.depth - expected.position.z).abs() < 1e-5);
        }
    }

    #[test]
    fn test_uv_is_perspective_correct() {
        let tri = triangle();
        let fragment = Fragment::interpolate(&tri, [1.0 / 3.0; 3]).unwrap();
        // Screen-space average would be (1/3, 1/3); the near vertex pulls harder
        let inv_w = (1.0 / 2.0 + 1.0 / 5.0 + 1.0 / 20.0) / 3.0;
        let expected = Vec2::new(1.0 / 5.0 / 3.0, 1.0 / 20.0 / 3.0) / inv_w;
        assert!((fragment.uv - expected).length() < 1e-5);
    }

    #[test]
    fn test_depth_is_reciprocal_interpolated() {
        let tri = triangle();
        let fragment = Fragment::interpolate(&tri, [0.5, 0.5, 0.0]).unwrap();
        let expected = 1.0 / (0.5 / 0.9 + 0.5 / 0.95);
        assert!((fragment.depth - expected).abs() < 1e-6);
    }

    #[test]
    fn test_depth_outside_range_rejected() {
        let mut tri = triangle();
        tri[0].position.z = -0.5;
        tri[1].position.z = -0.5;
        tri[2].position.z = -0.5;
        assert!(Fragment::interpolate(&tri, [1.0 / 3.0; 3]).is_none());
    }

    fn lit_fragment() -> Fragment {
        Fragment::interpolate(&triangle(), [1.0 / 3.0; 3]).unwrap()
    }

    #[test]
    fn test_observed_area_mode() {
        let c = shade_fragment(&lit_fragment(), &TextureSet::default(), &config(ShadingMode::ObservedArea));
        assert!((c - Color::ONE).length() < 1e-5);
    }

    #[test]
    fn test_diffuse_uses_vertex_color_without_map() {
        let c = shade_fragment(&lit_fragment(), &TextureSet::default(), &config(ShadingMode::Diffuse));
        assert!((c - Color::splat(2.0 / PI)).length() < 1e-5);
    }

    #[test]
    fn test_diffuse_map_replaces_vertex_color() {
        let textures = TextureSet {
            diffuse: Some(Arc::new(Texture::solid_color(Color::new(1.0, 0.0, 0.0)))),
            ..Default::default()
        };
        let c = shade_fragment(&lit_fragment(), &textures, &config(ShadingMode::Diffuse));
        assert!((c - Color::new(2.0 / PI, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_specular_needs_map() {
        let fragment = lit_fragment();
        let none = shade_fragment(&fragment, &TextureSet::default(), &config(ShadingMode::Specular));
        assert_eq!(none, Color::ZERO);

        let textures = TextureSet {
            specular: Some(Arc::new(Texture::solid_color(Color::ONE))),
            gloss: Some(Arc::new(Texture::solid_color(Color::ONE))),
            ..Default::default()
        };
        // Light, normal and viewer all on one axis: full highlight
        let c = shade_fragment(&fragment, &textures, &config(ShadingMode::Specular));
        assert!((c - Color::ONE).length() < 1e-4);
    }

    #[test]
    fn test_normal_map_tilts_normal() {
        let fragment = lit_fragment();
        // Encodes the tangent-space vector (1, 0, 0): the normal becomes the tangent
        let textures = TextureSet {
            normal: Some(Arc::new(Texture::solid_color(Color::new(1.0, 0.5, 0.5)))),
            ..Default::default()
        };
        let mut cfg = config(ShadingMode::ObservedArea);
        let c = shade_fragment(&fragment, &textures, &cfg);
        // Tangent is perpendicular to the light, so nothing is lit
        assert_eq!(c, Color::ZERO);

        cfg.normal_mapping = false;
        let c = shade_fragment(&fragment, &textures, &cfg);
        assert!((c - Color::ONE).length() < 1e-5);
    }

    #[test]
    fn test_ambient_only_in_combined() {
        let mut cfg = config(ShadingMode::Combined);
        cfg.lights.clear();
        cfg.ambient = Color::splat(0.1);
        let c = shade_fragment(&lit_fragment(), &TextureSet::default(), &cfg);
        assert_eq!(c, Color::splat(0.1));

        cfg.shading_mode = ShadingMode::Diffuse;
        let c = shade_fragment(&lit_fragment(), &TextureSet::default(), &cfg);
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_shading_mode_cycle() {
        assert_eq!(ShadingMode::Combined.cycle(), ShadingMode::ObservedArea);
        assert_eq!(ShadingMode::ObservedArea.cycle(), ShadingMode::Diffuse);
    }
}
