//! Vertex pipeline: clip-space transform, perspective divide, viewport map.

use crate::error::{Error, Result};
use crate::math::{Mat4, Vec4};
use crate::mesh::Face;
use crate::render::ScreenTriangle;

/// Smallest clip-space `w` accepted before the divide.
pub const W_EPSILON: f32 = 1e-6;

/// Pixel dimensions of the image the pipeline maps into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::viewport(format!(
                "dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Maps normalized device coordinates to pixels.
    ///
    /// ```text
    /// screen_x = cx + cx * x
    /// screen_y = cy - cy * y   (image rows grow downward)
    /// ```
    ///
    /// `z` passes through unchanged as the fragment depth.
    #[inline]
    pub fn to_screen(&self, ndc: Vec4) -> Vec4 {
        let cx = self.width as f32 / 2.0;
        let cy = self.height as f32 / 2.0;
        Vec4::new(cx + cx * ndc.x, cy - cy * ndc.y, ndc.z, 1.0)
    }
}

/// Why a triangle never reached the rasterizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// A vertex sits on or behind the eye plane (`w <= 0`).
    BehindEye,
    /// The transform produced NaN or infinite coordinates.
    NonFinite,
}

/// Transforms object-space triangles to screen space for one frame.
#[derive(Clone, Copy, Debug)]
pub struct VertexPipeline {
    interpolator: Mat4,
    viewport: Viewport,
}

impl VertexPipeline {
    /// `interpolator` is the combined `projection * view * world` matrix.
    pub fn new(interpolator: Mat4, viewport: Viewport) -> Self {
        Self {
            interpolator,
            viewport,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Project one vertex to screen space.
    pub fn project_vertex(&self, vertex: Vec4) -> std::result::Result<Vec4, Rejection> {
        let clip = self.interpolator * vertex;
        if !clip.is_finite() {
            return Err(Rejection::NonFinite);
        }
        if clip.w < W_EPSILON {
            return Err(Rejection::BehindEye);
        }
        let ndc = clip.perspective_divide(W_EPSILON).ok_or(Rejection::BehindEye)?;
        let screen = self.viewport.to_screen(ndc);
        if screen.is_finite() {
            Ok(screen)
        } else {
            Err(Rejection::NonFinite)
        }
    }

    /// Project all three vertices; the whole triangle is rejected if any one
    /// vertex is.
    pub fn project(&self, face: &Face) -> std::result::Result<ScreenTriangle, Rejection> {
        let [a, b, c] = face.vertices;
        Ok(ScreenTriangle::new([
            self.project_vertex(a)?,
            self.project_vertex(b)?,
            self.project_vertex(c)?,
        ]))
    }
}
