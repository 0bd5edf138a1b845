//! Color + depth render target with the depth-tested write path.

use super::depth::DepthBuffer;
use super::fragment::{Fragment, FragmentSink};
use super::framebuffer::FrameBuffer;
use crate::colors::{self, Color};

/// The pair of buffers one frame draws into.
///
/// Both buffers share dimensions and are cleared together at frame start, so
/// nothing leaks from one frame to the next.
#[derive(Clone, Debug)]
pub struct RenderTarget {
    color: FrameBuffer,
    depth: DepthBuffer,
    background: Color,
}

impl RenderTarget {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            color: FrameBuffer::new(width, height, background),
            depth: DepthBuffer::new(width, height),
            background,
        }
    }

    pub fn width(&self) -> u32 {
        self.color.width()
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    pub fn color(&self) -> &FrameBuffer {
        &self.color
    }

    /// Direct color access for passes that bypass the depth test.
    pub fn color_mut(&mut self) -> &mut FrameBuffer {
        &mut self.color
    }

    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    pub fn depth_mut(&mut self) -> &mut DepthBuffer {
        &mut self.depth
    }

    /// Reset color to the background and depth to `+inf`.
    pub fn clear(&mut self) {
        self.color.clear(self.background);
        self.depth.clear();
    }

    /// Reallocate both buffers at a new size, cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.color = FrameBuffer::new(width, height, self.background);
        self.depth = DepthBuffer::new(width, height);
    }

    /// Debug view of the depth buffer: each pixel is `255 - depth`, clamped to
    /// [0, 255]. Empty pixels (`+inf`) come out black.
    pub fn visualize_depth(&self) -> FrameBuffer {
        self.depth_image(|depth| (255.0 - depth).clamp(0.0, 255.0) as u8)
    }

    /// Depth view stretched over the finite depth range: nearest pixel white,
    /// farthest dark gray, empty pixels black.
    pub fn visualize_depth_normalized(&self) -> FrameBuffer {
        let Some((near, far)) = self.depth.finite_range() else {
            return FrameBuffer::new(self.width(), self.height(), colors::BLACK);
        };
        let span = (far - near).max(f32::EPSILON);
        self.depth_image(|depth| {
            if depth.is_finite() {
                let t = (depth - near) / span;
                (255.0 - t * 223.0).clamp(32.0, 255.0) as u8
            } else {
                0
            }
        })
    }

    fn depth_image(&self, intensity: impl Fn(f32) -> u8) -> FrameBuffer {
        let mut image = FrameBuffer::new(self.width(), self.height(), colors::BLACK);
        for (i, depth) in self.depth.depths().iter().enumerate() {
            image.set_index(i, Color::gray(intensity(*depth)));
        }
        image
    }
}

impl FragmentSink for RenderTarget {
    /// Depth-tested write: out-of-range fragments are dropped, otherwise the
    /// fragment wins only if it is strictly nearer than what is stored.
    #[inline]
    fn submit(&mut self, fragment: Fragment) -> bool {
        let Some(index) = self.color.index(fragment.x, fragment.y) else {
            return false;
        };
        if self.depth.test_and_set(index, fragment.depth) {
            self.color.set_index(index, fragment.color);
            true
        } else {
            false
        }
    }
}
