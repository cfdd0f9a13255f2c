//! RGBA8 pixel buffer written by the ray backend.

use lumen_math::Color;

/// Row-major RGBA8 image, `(0, 0)` at the top left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Framebuffer {
    /// A buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        let mut fb = Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        };
        fb.fill(&Color::zeros());
        fb
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    /// Write an opaque pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: &Color) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + 4].copy_from_slice(&to_rgba8(color));
        }
    }

    /// Read a pixel, `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        let mut px = [0; 4];
        px.copy_from_slice(&self.data[i..i + 4]);
        Some(px)
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: &Color) {
        let px = to_rgba8(color);
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning its raw RGBA bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Quantize a `[0, 1]` colour to opaque RGBA8.
pub fn to_rgba8(color: &Color) -> [u8; 4] {
    let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(color.x), q(color.y), q(color.z), 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_opaque_black() {
        let fb = Framebuffer::new(3, 2);
        assert_eq!(fb.as_bytes().len(), 24);
        assert_eq!(fb.pixel(2, 1), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_set_and_read() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_pixel(1, 2, &Color::new(1.0, 0.5, 0.0));
        assert_eq!(fb.pixel(1, 2), Some([255, 128, 0, 255]));
        assert_eq!(fb.pixel(2, 1), Some([0, 0, 0, 255]));
        // row-major layout
        let i = (2 * 4 + 1) * 4;
        assert_eq!(&fb.as_bytes()[i..i + 4], &[255, 128, 0, 255]);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut fb = Framebuffer::new(2, 2);
        fb.set_pixel(2, 0, &Color::new(1.0, 1.0, 1.0));
        assert_eq!(fb.pixel(2, 0), None);
        assert!(fb.as_bytes().chunks(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_quantize_clamps() {
        assert_eq!(to_rgba8(&Color::new(-1.0, 2.0, 0.2)), [0, 255, 51, 255]);
    }
}
