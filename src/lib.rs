//! A CPU Z-buffer triangle rasterizer.
//!
//! Triangles are transformed by a single `projection * view * world` matrix,
//! mapped to the viewport, scan converted with edge functions and resolved
//! per pixel with a depth buffer. Everything runs on the CPU; the result is
//! an owned color buffer and depth buffer that can be written out as PNG.
//!
//! # Quick Start
//!
//! ```
//! use zcull::prelude::*;
//!
//! let engine = Engine::new(320, 240)?;
//! let frame = engine.render(&Mesh::cube());
//! assert!(frame.stats.depth_passed > 0);
//! # Ok::<(), zcull::Error>(())
//! ```

pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod transform;

pub use camera::Camera;
pub use config::SceneConfig;
pub use engine::{Engine, Frame, FrameStats};
pub use error::{Error, Result};
pub use mesh::{Face, Mesh, MeshSource, ObjMesh};
pub use projection::Projection;
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use zcull::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::colors::Color;
    pub use crate::config::SceneConfig;
    pub use crate::engine::{Engine, Frame, FrameStats};
    pub use crate::error::{Error, Result};
    pub use crate::mesh::{Face, Mesh, MeshSource, ObjMesh};
    pub use crate::projection::Projection;
    pub use crate::transform::Transform;

    pub use crate::math::{Mat4, Vec2, Vec3, Vec4};

    pub use crate::pipeline::Viewport;
    pub use crate::render::{CullMode, RenderTarget, ShadingMode};
}
