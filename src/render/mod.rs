//! Rasterization and visibility.
//!
//! Provides the scan converter, the depth-tested [`RenderTarget`] it writes
//! into, and the wireframe overlay pass.

mod depth;
mod fragment;
mod framebuffer;
mod overlay;
mod rasterizer;
mod target;

pub use depth::DepthBuffer;
pub use fragment::{Fragment, FragmentSink};
pub use framebuffer::FrameBuffer;
pub use overlay::draw_wireframe;
pub use rasterizer::{
    barycentric, edge_function, BarycentricShader, Coverage, CullMode, EdgeFunctionRasterizer,
    FlatShader, PixelShader, ScreenTriangle, ShadingMode, AREA_EPSILON,
};
pub use target::RenderTarget;
