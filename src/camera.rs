//! Look-at camera.
//!
//! # Coordinate System
//!
//! Right-handed: X right, Y up, and the camera looks down its local -Z.

use crate::error::{Error, Result};
use crate::math::{Mat4, Vec3};

/// Camera defined by an eye position, a target and an up hint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eye: Vec3,
    at: Vec3,
    up: Vec3,
}

impl Default for Camera {
    /// Two units in front of the origin on -Z, looking at the origin.
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, -2.0),
            at: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl Camera {
    /// Creates a camera at `eye` looking toward `at`.
    ///
    /// Fails if the two points coincide, if `up` has zero length or if it is
    /// parallel to the viewing direction: each would leave the view basis
    /// undefined.
    pub fn new(eye: Vec3, at: Vec3, up: Vec3) -> Result<Self> {
        if !(eye.is_finite() && at.is_finite() && up.is_finite()) {
            return Err(Error::camera("eye, target and up must be finite"));
        }
        let forward = eye - at;
        if forward.magnitude() <= f32::EPSILON {
            return Err(Error::camera("eye and target coincide"));
        }
        if up.magnitude() <= f32::EPSILON {
            return Err(Error::camera("up vector has zero length"));
        }
        let sin_angle = up.normalize().cross(forward.normalize()).magnitude();
        if sin_angle <= 1e-6 {
            return Err(Error::camera("up vector is parallel to the view direction"));
        }
        Ok(Self { eye, at, up })
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn at(&self) -> Vec3 {
        self.at
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit vector from the eye toward the target.
    pub fn forward(&self) -> Vec3 {
        (self.at - self.eye).normalize()
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.at, self.up)
    }
}
