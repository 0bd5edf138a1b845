//! Frame rendering.
//!
//! The [`Engine`] holds everything that stays fixed for a frame (viewport,
//! camera, projection, object transform, pass settings) and drives the
//! pipeline: one interpolator matrix per frame, the vertex pipeline per
//! triangle, the depth-tested fill, then the optional wireframe overlay.
//! Buffers are not owned by the engine; each frame draws into a
//! [`RenderTarget`] that the caller passes in or receives back.

use tracing::{debug, trace};

use crate::camera::Camera;
use crate::colors::Color;
use crate::config::SceneConfig;
use crate::error::Result;
use crate::math::Mat4;
use crate::mesh::{Face, MeshSource};
use crate::pipeline::{VertexPipeline, Viewport};
use crate::projection::Projection;
use crate::render::{
    draw_wireframe, BarycentricShader, Coverage, CullMode, EdgeFunctionRasterizer, FlatShader,
    Fragment, FragmentSink, PixelShader, RenderTarget, ScreenTriangle, ShadingMode,
};
use crate::transform::Transform;

/// Counters for one rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles read from the mesh.
    pub triangles: usize,
    /// Triangles that reached the rasterizer and were not culled or degenerate.
    pub rasterized: usize,
    /// Discarded by the cull mode.
    pub culled: usize,
    /// Zero-area triangles in screen space.
    pub degenerate: usize,
    /// A vertex was on or behind the eye plane, or not finite.
    pub rejected: usize,
    /// Fragments submitted to the depth test.
    pub fragments: usize,
    /// Fragments that passed the depth test when submitted.
    pub depth_passed: usize,
}

/// A finished frame: the buffers it was drawn into and its counters.
#[derive(Clone, Debug)]
pub struct Frame {
    pub target: RenderTarget,
    pub stats: FrameStats,
}

/// Per-frame pipeline settings.
#[derive(Clone, Debug)]
pub struct Engine {
    viewport: Viewport,
    camera: Camera,
    projection: Projection,
    transform: Transform,
    rasterizer: EdgeFunctionRasterizer,
    shading: ShadingMode,
    fill_color: Color,
    wireframe: Option<Color>,
    background: Color,
}

impl Engine {
    /// Engine with the reference scene settings for a `width x height` image.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let viewport = Viewport::new(width, height)?;
        let defaults = SceneConfig::default();
        Ok(Self {
            viewport,
            camera: Camera::default(),
            projection: Projection::from_degrees(
                defaults.projection.fov_y_degrees,
                viewport.aspect_ratio(),
                defaults.projection.z_near,
                defaults.projection.z_far,
            )?,
            transform: Transform::default(),
            rasterizer: EdgeFunctionRasterizer::new(defaults.cull_mode),
            shading: defaults.shading,
            fill_color: defaults.fill_color,
            wireframe: defaults.wireframe.then_some(defaults.wireframe_color),
            background: defaults.background,
        })
    }

    /// Build an engine from a validated configuration.
    pub fn from_config(config: &SceneConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            viewport: config.viewport()?,
            camera: config.camera()?,
            projection: config.projection()?,
            transform: config.transform(),
            rasterizer: EdgeFunctionRasterizer::new(config.cull_mode),
            shading: config.shading,
            fill_color: config.fill_color,
            wireframe: config.wireframe.then_some(config.wireframe_color),
            background: config.background,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Change the image size, keeping the projection's aspect ratio in step.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let viewport = Viewport::new(width, height)?;
        self.projection.set_aspect_ratio(viewport.aspect_ratio())?;
        self.viewport = viewport;
        Ok(())
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn cull_mode(&self) -> CullMode {
        self.rasterizer.cull_mode()
    }

    pub fn set_cull_mode(&mut self, cull_mode: CullMode) {
        self.rasterizer.set_cull_mode(cull_mode);
    }

    pub fn shading(&self) -> ShadingMode {
        self.shading
    }

    pub fn set_shading(&mut self, shading: ShadingMode, fill_color: Color) {
        self.shading = shading;
        self.fill_color = fill_color;
    }

    /// Outline color for the overlay pass, or `None` to skip it.
    pub fn set_wireframe(&mut self, color: Option<Color>) {
        self.wireframe = color;
    }

    pub fn wireframe(&self) -> Option<Color> {
        self.wireframe
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// Combined `projection * view * world` matrix for this frame.
    pub fn interpolator(&self) -> Mat4 {
        self.projection.matrix() * self.camera.view_matrix() * self.transform.to_matrix()
    }

    /// A cleared target matching the engine's viewport.
    pub fn create_target(&self) -> RenderTarget {
        RenderTarget::new(self.viewport.width(), self.viewport.height(), self.background)
    }

    /// Render a frame into fresh buffers.
    pub fn render<M: MeshSource + ?Sized>(&self, mesh: &M) -> Frame {
        let mut target = self.create_target();
        let stats = self.render_into(mesh, &mut target);
        Frame { target, stats }
    }

    /// Render a frame into `target`, clearing it first.
    ///
    /// A target of the wrong size is reallocated to the viewport.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(width = self.viewport.width(), height = self.viewport.height())
    )]
    pub fn render_into<M: MeshSource + ?Sized>(
        &self,
        mesh: &M,
        target: &mut RenderTarget,
    ) -> FrameStats {
        if target.width() != self.viewport.width() || target.height() != self.viewport.height() {
            target.resize(self.viewport.width(), self.viewport.height());
        }
        target.set_background(self.background);
        target.clear();

        let pipeline = VertexPipeline::new(self.interpolator(), self.viewport);
        let faces = mesh.faces();

        let (stats, outlines) = match self.shading {
            ShadingMode::Barycentric => self.fill_pass(faces, &pipeline, &BarycentricShader, target),
            ShadingMode::Flat => {
                self.fill_pass(faces, &pipeline, &FlatShader::new(self.fill_color), target)
            }
        };

        if let Some(color) = self.wireframe {
            for triangle in &outlines {
                draw_wireframe(target.color_mut(), triangle, color);
            }
        }

        debug!(
            triangles = stats.triangles,
            rasterized = stats.rasterized,
            culled = stats.culled,
            degenerate = stats.degenerate,
            rejected = stats.rejected,
            fragments = stats.fragments,
            depth_passed = stats.depth_passed,
            "frame rendered"
        );
        stats
    }

    /// Depth-tested fill. Returns the counters and, when the overlay is on,
    /// the triangles that covered at least one pixel.
    fn fill_pass<S: PixelShader>(
        &self,
        faces: &[Face],
        pipeline: &VertexPipeline,
        shader: &S,
        target: &mut RenderTarget,
    ) -> (FrameStats, Vec<ScreenTriangle>) {
        let mut stats = FrameStats {
            triangles: faces.len(),
            ..FrameStats::default()
        };
        let mut outlines = Vec::new();
        let mut sink = DepthTestCounter { target, passed: 0 };

        for (index, face) in faces.iter().enumerate() {
            let triangle = match pipeline.project(face) {
                Ok(triangle) => triangle,
                Err(reason) => {
                    trace!(index, ?reason, "triangle rejected by vertex pipeline");
                    stats.rejected += 1;
                    continue;
                }
            };

            match self
                .rasterizer
                .fill_triangle(&triangle, self.viewport, shader, &mut sink)
            {
                Coverage::Degenerate => {
                    trace!(index, "degenerate triangle skipped");
                    stats.degenerate += 1;
                }
                Coverage::Culled => stats.culled += 1,
                Coverage::Covered(count) => {
                    stats.rasterized += 1;
                    stats.fragments += count;
                    if count > 0 && self.wireframe.is_some() {
                        outlines.push(triangle);
                    }
                }
            }
        }

        stats.depth_passed = sink.passed;
        (stats, outlines)
    }
}

/// Forwards fragments to the target, counting depth-test winners.
struct DepthTestCounter<'a> {
    target: &'a mut RenderTarget,
    passed: usize,
}

impl FragmentSink for DepthTestCounter<'_> {
    #[inline]
    fn submit(&mut self, fragment: Fragment) -> bool {
        let won = self.target.submit(fragment);
        self.passed += usize::from(won);
        won
    }
}
