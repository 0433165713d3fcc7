//! BRDF library.
//!
//! Direction conventions: `n` is the unit surface normal, `l` the unit
//! direction from the surface towards the light, `v` the unit direction from
//! the surface towards the viewer.

use std::f32::consts::PI;

use lumen_math::{Color, Vec3};

/// Lambert diffuse with a scalar reflectance.
#[inline]
pub fn lambert(kd: f32, cd: Color) -> Color {
    cd * kd / PI
}

/// Lambert diffuse with a per-channel reflectance.
#[inline]
pub fn lambert_rgb(kd: Color, cd: Color) -> Color {
    cd * kd / PI
}

/// Phong specular lobe.
pub fn phong(ks: f32, exponent: f32, l: Vec3, v: Vec3, n: Vec3) -> Color {
    let reflect = 2.0 * n.dot(l) * n - l;
    let cosine = reflect.dot(v).max(0.0);
    Color::splat(ks * cosine.powf(exponent))
}

/// Schlick's approximation of the Fresnel term.
pub fn fresnel_schlick(h: Vec3, v: Vec3, f0: Color) -> Color {
    let c = (1.0 - h.dot(v)).clamp(0.0, 1.0);
    f0 + (Color::ONE - f0) * c.powi(5)
}

/// Trowbridge-Reitz GGX normal distribution with `α = roughness²`.
pub fn normal_distribution_ggx(n: Vec3, h: Vec3, roughness: f32) -> f32 {
    let alpha = roughness * roughness;
    let alpha2 = alpha * alpha;
    let n_dot_h = n.dot(h);
    let d = n_dot_h * n_dot_h * (alpha2 - 1.0) + 1.0;
    alpha2 / (PI * d * d)
}

/// Schlick-GGX geometry term for one direction, direct-lighting `k`.
pub fn geometry_schlick_ggx(n: Vec3, v: Vec3, roughness: f32) -> f32 {
    let alpha = roughness * roughness;
    let k = (alpha + 1.0) * (alpha + 1.0) / 8.0;
    let d = n.dot(v).max(0.0);
    d / (d * (1.0 - k) + k)
}

/// Smith geometry term: masking (view) times shadowing (light).
pub fn geometry_smith(n: Vec3, v: Vec3, l: Vec3, roughness: f32) -> f32 {
    geometry_schlick_ggx(n, v, roughness) * geometry_schlick_ggx(n, l, roughness)
}

/// Floor for the Cook-Torrance denominator at grazing angles.
const SPECULAR_EPSILON: f32 = 1e-4;

/// Cook-Torrance microfacet BRDF: Lambert diffuse plus `D·F·G / (4 (v·n)(l·n))`.
///
/// Any non-zero `metalness` is treated as a conductor: `f0` is the albedo and
/// the diffuse part vanishes.
pub fn cook_torrance(albedo: Color, metalness: f32, roughness: f32, n: Vec3, l: Vec3, v: Vec3) -> Color {
    let h = (v + l).normalize_or_zero();
    let metal = metalness > 0.0;
    let f0 = if metal { albedo } else { Color::splat(0.04) };

    let f = fresnel_schlick(h, v, f0);
    let d = normal_distribution_ggx(n, h, roughness);
    let g = geometry_smith(n, v, l, roughness);

    let denominator = (4.0 * v.dot(n) * l.dot(n)).max(SPECULAR_EPSILON);
    let specular = f * (d * g / denominator);

    let kd = if metal { Color::ZERO } else { Color::ONE - f };
    lambert_rgb(kd, albedo) + specular
}
