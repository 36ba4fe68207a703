//! ImageData
//!
//! Straight-alpha RGBA pixel blocks read from and written to the canvas
//! backing store (`getImageData` / `putImageData`).

use tiny_skia::ColorU8;

use crate::{CanvasError, CanvasRenderingContext2D};

/// ImageData - raw pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageData {
    /// Transparent block of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Wrap existing RGBA bytes
    pub fn from_data(data: Vec<u8>, width: u32, height: u32) -> Result<Self, CanvasError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CanvasError::InvalidImageData {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(idx..idx + 4)?.try_into().ok()
    }

    /// Set pixel at (x, y); out-of-range writes are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x < self.width && y < self.height {
            let idx = (y as usize * self.width as usize + x as usize) * 4;
            self.data[idx..idx + 4].copy_from_slice(&rgba);
        }
    }
}

impl CanvasRenderingContext2D {
    /// Copy a block of pixels; areas outside the canvas read as transparent
    pub fn get_image_data(&self, sx: i32, sy: i32, width: u32, height: u32) -> ImageData {
        let mut image = ImageData::new(width, height);
        let Some(pixmap) = self.pixmap() else {
            return image;
        };
        for y in 0..height {
            for x in 0..width {
                let (px, py) = (sx + x as i32, sy + y as i32);
                if px < 0 || py < 0 {
                    continue;
                }
                if let Some(p) = pixmap.pixel(px as u32, py as u32) {
                    let c = p.demultiply();
                    image.set_pixel(x, y, [c.red(), c.green(), c.blue(), c.alpha()]);
                }
            }
        }
        image
    }

    /// Write a block of pixels verbatim, ignoring transform, alpha and clip
    pub fn put_image_data(&mut self, image: &ImageData, dx: i32, dy: i32) {
        let width = self.width();
        let height = self.height();
        let Some(pixmap) = self.pixmap_mut() else {
            return;
        };
        let pixels = pixmap.pixels_mut();
        for y in 0..image.height() {
            for x in 0..image.width() {
                let (px, py) = (dx + x as i32, dy + y as i32);
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    continue;
                }
                if let Some([r, g, b, a]) = image.get_pixel(x, y) {
                    pixels[py as usize * width as usize + px as usize] =
                        ColorU8::from_rgba(r, g, b, a).premultiply();
                }
            }
        }
    }
}
