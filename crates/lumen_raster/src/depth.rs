/// Per-pixel depth plane, reset to +infinity at the start of every frame.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    pub width: u32,
    pub height: u32,
    pub depths: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depths: vec![f32::INFINITY; width as usize * height as usize],
        }
    }

    pub fn clear(&mut self) {
        self.depths.fill(f32::INFINITY);
    }

    /// Match the framebuffer size. Contents are cleared on resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width != width || self.height != height {
            *self = Self::new(width, height);
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.depths[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Store `depth` if it is strictly closer than the stored value.
    pub fn test_and_set(&mut self, x: u32, y: u32, depth: f32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        depth_test_and_set(&mut self.depths[(y * self.width + x) as usize], depth)
    }
}

/// Strict less-than depth test on a single slot.
#[inline]
pub fn depth_test_and_set(slot: &mut f32, depth: f32) -> bool {
    if depth < *slot {
        *slot = depth;
        true
    } else {
        false
    }
}
