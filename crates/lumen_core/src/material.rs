//! Surface materials evaluated by the ray tracer.

use lumen_math::{Color, Vec3};

use crate::brdf;

/// Closed set of surface responses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Returns its colour regardless of lighting.
    SolidColor { color: Color },
    Lambert { diffuse_color: Color, kd: f32 },
    LambertPhong {
        diffuse_color: Color,
        kd: f32,
        ks: f32,
        exponent: f32,
    },
    /// Microfacet BRDF; roughness in `[0, 1]`, smooth to rough.
    CookTorrance {
        albedo: Color,
        metalness: f32,
        roughness: f32,
    },
}

impl Material {
    pub fn solid(color: Color) -> Self {
        Material::SolidColor { color }
    }

    pub fn lambert(diffuse_color: Color, kd: f32) -> Self {
        Material::Lambert { diffuse_color, kd }
    }

    pub fn lambert_phong(diffuse_color: Color, kd: f32, ks: f32, exponent: f32) -> Self {
        Material::LambertPhong {
            diffuse_color,
            kd,
            ks,
            exponent,
        }
    }

    pub fn cook_torrance(albedo: Color, metalness: f32, roughness: f32) -> Self {
        Material::CookTorrance {
            albedo,
            metalness,
            roughness,
        }
    }

    /// BRDF value for unit normal `n`, direction to the light `l` and
    /// direction to the viewer `v`.
    pub fn shade(&self, n: Vec3, l: Vec3, v: Vec3) -> Color {
        match *self {
            Material::SolidColor { color } => color,
            Material::Lambert { diffuse_color, kd } => brdf::lambert(kd, diffuse_color),
            Material::LambertPhong {
                diffuse_color,
                kd,
                ks,
                exponent,
            } => brdf::lambert(kd, diffuse_color) + brdf::phong(ks, exponent, l, v, n),
            Material::CookTorrance {
                albedo,
                metalness,
                roughness,
            } => brdf::cook_torrance(albedo, metalness, roughness, n, l, v),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::SolidColor { color: Color::ONE }
    }
}
