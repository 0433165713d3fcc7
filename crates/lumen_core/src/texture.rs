//! Texture sampling for the rasterizer's pixel shader.
//!
//! Textures keep the raw 0-1 channel values of the source image. Normal,
//! specular and gloss maps are data rather than colour, so no sRGB decode is
//! applied to any of them. UV `(0, 0)` is the top-left texel.

use std::path::Path;

use lumen_math::{Color, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {0} has zero size")]
    Empty(String),

    #[error("Pixel buffer holds {actual} texels, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// How texels are reconstructed between pixel centres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleFilter {
    /// Nearest texel.
    #[default]
    Point,
    /// Bilinear blend of the four surrounding texels.
    Linear,
}

impl SampleFilter {
    /// Next filter in the cycle.
    pub fn cycle(self) -> Self {
        match self {
            SampleFilter::Point => SampleFilter::Linear,
            SampleFilter::Linear => SampleFilter::Point,
        }
    }
}

/// A loaded texture with pixel data.
#[derive(Clone, Debug)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    /// RGBA per texel, row-major from the top-left.
    pub pixels: Vec<[f32; 4]>,
}

impl Texture {
    /// Create a texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> TextureResult<Self> {
        let expected = width as usize * height as usize;
        if expected == 0 {
            return Err(TextureError::Empty(format!("{width}x{height}")));
        }
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// 1x1 texture of a single colour.
    pub fn solid_color(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![[color.x, color.y, color.z, 1.0]],
        }
    }

    /// Load an image file.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: path.display().to_string(),
            source,
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba
            .pixels()
            .map(|p| {
                [
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                    p[3] as f32 / 255.0,
                ]
            })
            .collect();

        let texture = Self::new(width, height, pixels).map_err(|e| match e {
            TextureError::Empty(_) => TextureError::Empty(path.display().to_string()),
            other => other,
        })?;
        log::info!("Loaded texture {} ({}x{})", path.display(), width, height);
        Ok(texture)
    }

    /// Point-sampled colour. UV outside `[0, 1]` returns black.
    pub fn sample(&self, uv: Vec2) -> Color {
        self.sample_filtered(uv, SampleFilter::Point)
    }

    /// Colour with the given filter. UV outside `[0, 1]` returns black.
    pub fn sample_filtered(&self, uv: Vec2, filter: SampleFilter) -> Color {
        if !in_unit_range(uv) {
            return Color::ZERO;
        }
        match filter {
            SampleFilter::Point => self.sample_point(uv),
            SampleFilter::Linear => self.sample_bilinear(uv),
        }
    }

    /// Tangent-space normal decoded as `2c - 1`.
    pub fn sample_normal(&self, uv: Vec2, filter: SampleFilter) -> Vec3 {
        2.0 * self.sample_filtered(uv, filter) - Vec3::ONE
    }

    /// Single-channel value (red).
    pub fn sample_gray(&self, uv: Vec2, filter: SampleFilter) -> f32 {
        self.sample_filtered(uv, filter).x
    }

    fn sample_point(&self, uv: Vec2) -> Color {
        let x = ((uv.x * self.width as f32) as u32).min(self.width - 1);
        let y = ((uv.y * self.height as f32) as u32).min(self.height - 1);
        self.texel(x, y)
    }

    fn sample_bilinear(&self, uv: Vec2) -> Color {
        // Texel centres sit at half-integer coordinates
        let x = (uv.x * self.width as f32 - 0.5).max(0.0);
        let y = (uv.y * self.height as f32 - 0.5).max(0.0);

        let x0 = (x.floor() as u32).min(self.width - 1);
        let y0 = (y.floor() as u32).min(self.height - 1);
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let fx = x.fract();
        let fy = y.fract();

        let top = self.texel(x0, y0).lerp(self.texel(x1, y0), fx);
        let bottom = self.texel(x0, y1).lerp(self.texel(x1, y1), fx);
        top.lerp(bottom, fy)
    }

    fn texel(&self, x: u32, y: u32) -> Color {
        let idx = (y * self.width + x) as usize;
        self.pixels
            .get(idx)
            .map(|p| Color::new(p[0], p[1], p[2]))
            .unwrap_or(Color::ZERO)
    }
}

fn in_unit_range(uv: Vec2) -> bool {
    (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y)
}
