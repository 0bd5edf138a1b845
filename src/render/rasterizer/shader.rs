//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer handles coverage and barycentric weights; a shader turns the
//! weights of one covered pixel into a color.

use crate::colors::Color;

/// Per-pixel color computation.
///
/// `lambda` holds the barycentric weights `[l0, l1, l2]` of the pixel
/// relative to the triangle's vertices in submission order. They sum to 1 and
/// are interpolated linearly in screen space, not perspective-corrected.
pub trait PixelShader {
    fn shade(&self, lambda: [f32; 3]) -> Color;
}

/// Pseudo-color shader: vertex 0 is red, vertex 1 green, vertex 2 blue.
#[derive(Clone, Copy, Debug, Default)]
pub struct BarycentricShader;

impl PixelShader for BarycentricShader {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> Color {
        Color::from_barycentric(lambda)
    }
}

/// Flat shader - returns a constant color for all pixels.
#[derive(Clone, Copy, Debug)]
pub struct FlatShader {
    color: Color,
}

impl FlatShader {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _lambda: [f32; 3]) -> Color {
        self.color
    }
}

/// Which shader the engine uses for filled triangles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    /// Barycentric pseudo-color.
    #[default]
    Barycentric,
    /// One color per frame, taken from the configuration.
    Flat,
}
