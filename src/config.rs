//! Scene configuration.
//!
//! Everything the renderer needs besides the mesh: image size, camera,
//! projection, object transform and pass toggles. Loaded from JSON; every
//! field is optional and falls back to the reference scene (a model at the
//! origin seen from two units down -Z with a 60 degree vertical FOV).

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::colors::{self, Color};
use crate::error::{Error, Result};
use crate::math::Vec3;
use crate::pipeline::Viewport;
use crate::projection::Projection;
use crate::render::{CullMode, ShadingMode};
use crate::transform::Transform;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub width: u16,
    pub height: u16,
    /// OBJ file to render.
    pub model: Option<PathBuf>,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub object: ObjectConfig,
    pub cull_mode: CullMode,
    pub shading: ShadingMode,
    /// Fill color for [`ShadingMode::Flat`].
    pub fill_color: Color,
    /// Draw triangle outlines over the filled image.
    pub wireframe: bool,
    pub wireframe_color: Color,
    pub background: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            model: None,
            camera: CameraConfig::default(),
            projection: ProjectionConfig::default(),
            object: ObjectConfig::default(),
            cull_mode: CullMode::None,
            shading: ShadingMode::Barycentric,
            fill_color: Color::new(200, 200, 200),
            wireframe: true,
            wireframe_color: colors::WIREFRAME,
            background: colors::BACKGROUND,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub at: [f32; 3],
    pub up: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, -2.0],
            at: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionConfig {
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Defaults to width / height.
    pub aspect_ratio: Option<f32>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            z_near: 1.0,
            z_far: 10.0,
            aspect_ratio: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObjectConfig {
    pub translation: [f32; 3],
    pub rotation_degrees: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation_degrees: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

fn vec3([x, y, z]: [f32; 3]) -> Vec3 {
    Vec3::new(x, y, z)
}

impl SceneConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every parameter that would make the first frame undefined.
    pub fn validate(&self) -> Result<()> {
        self.viewport()?;
        self.camera()?;
        self.projection()?;
        let object = &self.object;
        if ![object.translation, object.rotation_degrees, object.scale]
            .into_iter()
            .all(|v| vec3(v).is_finite())
        {
            return Err(Error::transform("translation, rotation and scale must be finite"));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Result<Viewport> {
        Viewport::new(self.width.into(), self.height.into())
    }

    pub fn camera(&self) -> Result<Camera> {
        Camera::new(
            vec3(self.camera.eye),
            vec3(self.camera.at),
            vec3(self.camera.up),
        )
    }

    pub fn projection(&self) -> Result<Projection> {
        let aspect_ratio = match self.projection.aspect_ratio {
            Some(aspect) => aspect,
            None => self.viewport()?.aspect_ratio(),
        };
        Projection::from_degrees(
            self.projection.fov_y_degrees,
            aspect_ratio,
            self.projection.z_near,
            self.projection.z_far,
        )
    }

    pub fn transform(&self) -> Transform {
        let mut transform = Transform::new();
        transform
            .set_position(vec3(self.object.translation))
            .set_rotation_degrees(vec3(self.object.rotation_degrees))
            .set_scale(vec3(self.object.scale));
        transform
    }
}
