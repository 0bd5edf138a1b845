//! Color buffer with bounds-checked pixel access and line drawing.
//!
//! This is the image side of a render target: it knows nothing about depth.
//! Depth-tested writes go through [`RenderTarget`](super::RenderTarget).

use std::path::Path;

use crate::colors::Color;
use crate::error::Result;

/// An owned `width * height` grid of colors, row-major, origin top-left.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            pixels: vec![background; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Linear index of (x, y), or `None` when outside the buffer.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Write a pixel unconditionally. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color;
        }
    }

    #[inline]
    pub(crate) fn set_index(&mut self, index: usize, color: Color) {
        self.pixels[index] = color;
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Draws a line with Bresenham's algorithm, ignoring depth.
    ///
    /// The error term tracks the distance between the ideal line and the
    /// current pixel; each step moves along the major axis and, when the
    /// accumulated error crosses the threshold, along the minor axis too.
    /// Pixels that fall outside the buffer are skipped.
    ///
    /// The error term is kept in `i64`, so endpoints anywhere in the `i32`
    /// range never overflow. Callers with far off-screen endpoints should
    /// clip first; the walk visits every step between the endpoints.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (i64::from(x1) - i64::from(x0)).abs();
        let dy = (i64::from(y1) - i64::from(y0)).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };

        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += step_x;
            }
            if e2 < dx {
                err += dx;
                y += step_y;
            }
        }
    }

    /// Copy the buffer into an `image` RGB image for encoding.
    pub fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            self.pixels[y as usize * self.width as usize + x as usize].into()
        })
    }

    /// Encode to `path`; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_image().save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut fb = FrameBuffer::new(4, 3, BLACK);
        fb.set_pixel(-1, 0, WHITE);
        fb.set_pixel(4, 0, WHITE);
        fb.set_pixel(0, 3, WHITE);
        assert!(fb.pixels().iter().all(|&c| c == BLACK));
        assert_eq!(fb.get_pixel(4, 0), None);
        assert_eq!(fb.get_pixel(3, 2), Some(BLACK));
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut fb = FrameBuffer::new(4, 3, BLACK);
        fb.set_pixel(1, 1, WHITE);
        fb.clear(Color::gray(7));
        assert!(fb.pixels().iter().all(|&c| c == Color::gray(7)));
    }

    #[test]
    fn line_hits_both_endpoints() {
        let mut fb = FrameBuffer::new(10, 10, BLACK);
        fb.draw_line(1, 8, 7, 2, WHITE);
        assert_eq!(fb.get_pixel(1, 8), Some(WHITE));
        assert_eq!(fb.get_pixel(7, 2), Some(WHITE));
        assert_eq!(fb.get_pixel(4, 5), Some(WHITE));
        let lit = fb.pixels().iter().filter(|&&c| c == WHITE).count();
        assert_eq!(lit, 7);
    }

    #[test]
    fn line_with_distant_endpoint_does_not_overflow() {
        let mut fb = FrameBuffer::new(4, 4, BLACK);
        fb.draw_line(i32::MAX - 2, 1, i32::MAX, 1, WHITE);
        fb.draw_line(1, i32::MIN + 1, 1, i32::MIN, WHITE);
        assert!(fb.pixels().iter().all(|&c| c == BLACK));
    }

    #[test]
    fn line_clips_against_buffer() {
        let mut fb = FrameBuffer::new(5, 5, BLACK);
        fb.draw_line(-3, 2, 8, 2, WHITE);
        for x in 0..5 {
            assert_eq!(fb.get_pixel(x, 2), Some(WHITE));
        }
    }

    #[test]
    fn image_conversion_keeps_layout() {
        let mut fb = FrameBuffer::new(3, 2, BLACK);
        fb.set_pixel(2, 1, Color::new(1, 2, 3));
        let img = fb.to_image();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [1, 2, 3]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn save_writes_png_and_reports_bad_extension() {
        let mut fb = FrameBuffer::new(4, 4, BLACK);
        fb.set_pixel(1, 2, WHITE);

        let path = std::env::temp_dir().join(format!("zcull-fb-{}.png", std::process::id()));
        fb.save(&path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        let _ = std::fs::remove_file(&path);
        assert_eq!(decoded.get_pixel(1, 2).0, [255, 255, 255]);

        let bad = std::env::temp_dir().join("zcull-fb.unknown-format");
        assert!(matches!(fb.save(bad), Err(crate::Error::Image(_))));
    }
}
