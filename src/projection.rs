//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the
//! perspective parameters (FOV, aspect ratio, near/far planes). Parameters
//! are validated once, on construction, so a frame never starts with a
//! projection that would divide by zero.

use std::f32::consts::PI;

use crate::error::{Error, Result};
use crate::math::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    /// Near clipping plane distance.
    z_near: f32,
    /// Far clipping plane distance.
    z_far: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians, in (0, pi)
    /// * `aspect_ratio` - Width divided by height, > 0
    /// * `z_near` - Near plane distance, > 0
    /// * `z_far` - Far plane distance, > `z_near`
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Result<Self> {
        validate(fov_y, aspect_ratio, z_near, z_far)?;
        Ok(Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        })
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(
        fov_y_degrees: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    ) -> Result<Self> {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    /// Returns the vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Returns the horizontal field of view in radians.
    pub fn fov_x(&self) -> f32 {
        2.0 * (self.aspect_ratio * (self.fov_y / 2.0).tan()).atan()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Updates the aspect ratio (typically after a resize).
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) -> Result<()> {
        validate(self.fov_y, aspect_ratio, self.z_near, self.z_far)?;
        self.aspect_ratio = aspect_ratio;
        Ok(())
    }

    /// Right-handed, zero-to-one depth projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_zo(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }
}

fn validate(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Result<()> {
    if !(fov_y.is_finite() && aspect_ratio.is_finite() && z_near.is_finite() && z_far.is_finite())
    {
        return Err(Error::projection("parameters must be finite"));
    }
    if fov_y <= 0.0 || fov_y >= PI {
        return Err(Error::projection(format!(
            "vertical field of view must be in (0, pi), got {fov_y}"
        )));
    }
    if aspect_ratio <= 0.0 {
        return Err(Error::projection(format!(
            "aspect ratio must be positive, got {aspect_ratio}"
        )));
    }
    if z_near <= 0.0 {
        return Err(Error::projection(format!(
            "near plane must be positive, got {z_near}"
        )));
    }
    if z_far <= z_near {
        return Err(Error::projection(format!(
            "far plane ({z_far}) must lie beyond near plane ({z_near})"
        )));
    }
    Ok(())
}
