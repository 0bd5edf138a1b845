//! Triangle scan conversion.
//!
//! [`EdgeFunctionRasterizer`] walks the triangle's bounding box, tests each
//! pixel center against the three edge functions and hands covered pixels to
//! a [`FragmentSink`](super::FragmentSink) with an interpolated depth and a
//! shader-computed color.

mod edgefunction;
mod shader;

pub use edgefunction::{barycentric, edge_function, EdgeFunctionRasterizer, AREA_EPSILON};
pub use shader::{BarycentricShader, FlatShader, PixelShader, ShadingMode};

use crate::math::Vec4;

/// A triangle in screen space: `x`, `y` in pixels, `z` the post-divide depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTriangle {
    pub vertices: [Vec4; 3],
}

impl ScreenTriangle {
    pub fn new(vertices: [Vec4; 3]) -> Self {
        Self { vertices }
    }

    /// Convenience constructor from `(x, y, depth)` triples.
    pub fn from_xyz(points: [(f32, f32, f32); 3]) -> Self {
        Self::new(points.map(|(x, y, z)| Vec4::new(x, y, z, 1.0)))
    }

    /// Twice the signed area in screen space. Positive for front faces.
    pub fn signed_area(&self) -> f32 {
        let [a, b, c] = self.vertices;
        edge_function(a.xy(), b.xy(), c.xy())
    }
}

/// Which faces the rasterizer discards by winding.
///
/// A front face has positive signed screen-space area: counter-clockwise in
/// normalized device coordinates, which is clockwise on screen since image
/// rows grow downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    /// Draw both windings.
    #[default]
    None,
    /// Discard front faces.
    Front,
    /// Discard back faces.
    Back,
}

impl CullMode {
    /// Returns `true` if a triangle with this signed area is discarded.
    pub fn culls(self, signed_area: f32) -> bool {
        match self {
            CullMode::None => false,
            CullMode::Front => signed_area > 0.0,
            CullMode::Back => signed_area < 0.0,
        }
    }
}

impl std::fmt::Display for CullMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CullMode::None => write!(f, "none"),
            CullMode::Front => write!(f, "front"),
            CullMode::Back => write!(f, "back"),
        }
    }
}

/// What happened to one triangle in the rasterizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coverage {
    /// Zero (or non-finite) area; nothing was emitted.
    Degenerate,
    /// Discarded by the cull mode.
    Culled,
    /// Number of pixels found inside the triangle and submitted.
    Covered(usize),
}

impl Coverage {
    pub fn fragments(self) -> usize {
        match self {
            Coverage::Covered(n) => n,
            Coverage::Degenerate | Coverage::Culled => 0,
        }
    }
}
