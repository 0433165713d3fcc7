use std::path::Path;

use lumen_math::{color, Color};

/// 8-bit RGBA colour target, row-major from the top-left.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl Framebuffer {
    /// Create a black framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; width as usize * height as usize],
        }
    }

    pub fn clear(&mut self, color: Color) {
        let rgba = color::to_rgba8(color);
        self.pixels.fill(rgba);
    }

    /// Store a colour, rescaled with max-to-one. Out-of-bounds writes are ignored.
    pub fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color::to_rgba8(color);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// One mutable slice per row.
    pub fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, [u8; 4]> {
        self.pixels.chunks_mut(self.width.max(1) as usize)
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        let path = path.as_ref();
        image::save_buffer_with_format(
            path,
            self.as_bytes(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let fb = Framebuffer::new(4, 3);
        assert_eq!(fb.pixels.len(), 12);
        assert_eq!(fb.pixel(3, 2), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn test_write_pixel_max_to_one() {
        let mut fb = Framebuffer::new(2, 2);
        fb.write_pixel(1, 0, Color::new(2.0, 1.0, 0.0));
        assert_eq!(fb.pixel(1, 0), Some([255, 127, 0, 255]));

        // Ignored
        fb.write_pixel(5, 5, Color::ONE);
    }

    #[test]
    fn test_clear_and_bytes() {
        let mut fb = Framebuffer::new(2, 1);
        fb.clear(Color::new(0.0, 0.0, 1.0));
        assert_eq!(fb.as_bytes(), &[0, 0, 255, 255, 0, 0, 255, 255]);
    }

    #[test]
    fn test_rows_mut() {
        let mut fb = Framebuffer::new(3, 2);
        for (y, row) in fb.rows_mut().enumerate() {
            assert_eq!(row.len(), 3);
            row[0] = [y as u8, 0, 0, 255];
        }
        assert_eq!(fb.pixel(0, 1), Some([1, 0, 0, 255]));
    }

    #[test]
    fn test_save_png_round_trip() {
        let mut fb = Framebuffer::new(2, 2);
        fb.write_pixel(0, 0, Color::ONE);
        let path = std::env::temp_dir().join("lumen_core_framebuffer_test.png");
        fb.save_png(&path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }
}
