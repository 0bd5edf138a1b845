//! World transform of the rendered object.
//!
//! Provides a [`Transform`] with a fluent API for position, rotation (Euler
//! angles) and scale, and the world matrix built from them.

use crate::math::{Mat4, Vec3};

/// Position, rotation (Euler angles, radians) and scale.
///
/// ```ignore
/// transform
///     .set_position_xyz(0.0, 0.5, 0.0)
///     .rotate_y(0.1)
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform (position=0, rotation=0, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Position ============

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    // ============ Rotation ============

    /// Euler angles in radians.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Set the rotation from per-axis angles in degrees.
    pub fn set_rotation_degrees(&mut self, degrees: Vec3) -> &mut Self {
        self.rotation = degrees.to_radians();
        self
    }

    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotation.x += angle;
        self
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.rotation.z += angle;
        self
    }

    // ============ Scale ============

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    // ============ Matrix Generation ============

    /// World matrix.
    ///
    /// Order: Translation * RotationX * RotationY * RotationZ * Scale
    /// (scale applied first, then Z, Y, X rotations, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_z(self.rotation.z)
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
        assert_eq!(t.to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new();
        t.set_position_xyz(1.0, 2.0, 3.0)
            .rotate_y(0.5)
            .set_scale_uniform(2.0);

        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().y, 0.5);
        assert_eq!(t.scale(), Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn degrees_are_converted() {
        let mut t = Transform::new();
        t.set_rotation_degrees(Vec3::new(90.0, 0.0, 180.0));
        assert_relative_eq!(t.rotation().x, std::f32::consts::FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(t.rotation().z, std::f32::consts::PI, epsilon = 1e-6);
    }

    #[test]
    fn scale_applies_before_translation() {
        let mut t = Transform::new();
        t.set_position_xyz(1.0, 0.0, 0.0).set_scale_uniform(3.0);
        let p = t.to_matrix() * Vec4::point(1.0, 1.0, 0.0);
        assert_relative_eq!(p.x, 4.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-6);
    }
}
