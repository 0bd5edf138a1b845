//! 4x4 transformation matrix.
//!
//! # Convention
//! - Storage is `data[row][col]`
//! - Vectors are **column vectors** on the right: `Mat4 * Vec4`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `projection * view * world` applies
//!   `world` first
//!
//! The row-vector layout (`point * matrix`, translation in the bottom row) is
//! the transpose of every matrix built here. Use [`Mat4::transpose`] when
//! exchanging matrices with code that follows that layout.
//!
//! # Example
//! ```
//! use zcull::math::{Mat4, Vec4};
//!
//! let transform = Mat4::translation(1.0, 0.0, 0.0) * Mat4::scaling(2.0, 2.0, 2.0);
//! let moved = transform * Vec4::point(1.0, 1.0, 1.0); // scaled, then translated
//! assert_eq!(moved, Vec4::point(3.0, 2.0, 2.0));
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix (offset in the last column).
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around +X (right-handed), angle in radians.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around +Y (right-handed), angle in radians.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around +Z (right-handed), angle in radians.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed view matrix.
    ///
    /// The basis is built Gram-Schmidt style:
    ///
    /// ```text
    /// z_axis = normalize(eye - at)
    /// x_axis = normalize(up x z_axis)
    /// y_axis = z_axis x x_axis
    /// ```
    ///
    /// The camera looks down its local -Z. The caller guarantees `eye != at`
    /// and that `up` is not parallel to the view direction.
    pub fn look_at_rh(eye: Vec3, at: Vec3, up: Vec3) -> Self {
        let z_axis = (eye - at).normalize();
        let x_axis = up.cross(z_axis).normalize();
        let y_axis = z_axis.cross(x_axis);

        Self::new([
            [x_axis.x, x_axis.y, x_axis.z, -x_axis.dot(eye)],
            [y_axis.x, y_axis.y, y_axis.z, -y_axis.dot(eye)],
            [z_axis.x, z_axis.y, z_axis.z, -z_axis.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed perspective matrix with zero-to-one depth.
    ///
    /// After the divide, a point on the near plane lands at depth 0 and a point
    /// on the far plane at depth 1. The clip-space `w` is the distance in front
    /// of the camera (`-z_view`), so visible geometry always has `w > 0`.
    ///
    /// ```text
    /// y_scale = 1 / tan(fov_y / 2)
    /// x_scale = y_scale / aspect_ratio
    /// depth'  = far / (far - near) * (-z_view) - near * far / (far - near)
    /// ```
    pub fn perspective_rh_zo(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        let y_scale = 1.0 / (fov_y / 2.0).tan();
        let x_scale = y_scale / aspect_ratio;
        let range = z_far / (z_far - z_near);
        Mat4::new([
            [x_scale, 0.0, 0.0, 0.0],
            [0.0, y_scale, 0.0, 0.0],
            [0.0, 0.0, -range, -z_near * range],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let mut data = [[0.0f32; 4]; 4];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4 { data }
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Returns `true` if every element is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().flatten().all(|v| v.is_finite())
    }
}

/// Matrix multiplication: `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a homogeneous column vector: `Mat4 * Vec4`.
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            let [x, y, z, w] = self.data[r];
            Vec4::new(x, y, z, w).dot(v)
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    fn assert_vec4_eq(a: Vec4, b: Vec4) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
        assert_relative_eq!(a.w, b.w, epsilon = 1e-5);
    }

    #[test]
    fn identity_is_neutral() {
        let m = Mat4::translation(1.0, 2.0, 3.0) * Mat4::rotation_y(0.3);
        assert_eq!(m * Mat4::identity(), m);
        assert_eq!(Mat4::identity() * m, m);
    }

    #[test]
    fn multiply_is_not_commutative() {
        let t = Mat4::translation(1.0, 0.0, 0.0);
        let s = Mat4::scaling(2.0, 2.0, 2.0);
        let p = Vec4::point(1.0, 0.0, 0.0);
        // scale first, then translate
        assert_vec4_eq((t * s) * p, Vec4::point(3.0, 0.0, 0.0));
        // translate first, then scale
        assert_vec4_eq((s * t) * p, Vec4::point(4.0, 0.0, 0.0));
    }

    #[test]
    fn multiply_is_associative() {
        let a = Mat4::rotation_x(0.4);
        let b = Mat4::translation(1.0, -2.0, 0.5);
        let c = Mat4::rotation_z(1.1) * Mat4::scaling(1.0, 2.0, 3.0);
        let p = Vec4::point(0.3, 0.7, -1.2);
        assert_vec4_eq(((a * b) * c) * p, (a * (b * c)) * p);
    }

    #[test]
    fn transpose_twice_is_identity_op() {
        let m = Mat4::look_at_rh(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y);
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().get(3, 0), m.get(0, 3));
    }

    #[test]
    fn rotations_are_counter_clockwise() {
        assert_vec4_eq(
            Mat4::rotation_z(FRAC_PI_2) * Vec4::point(1.0, 0.0, 0.0),
            Vec4::point(0.0, 1.0, 0.0),
        );
        assert_vec4_eq(
            Mat4::rotation_x(FRAC_PI_2) * Vec4::point(0.0, 1.0, 0.0),
            Vec4::point(0.0, 0.0, 1.0),
        );
        assert_vec4_eq(
            Mat4::rotation_y(FRAC_PI_2) * Vec4::point(0.0, 0.0, 1.0),
            Vec4::point(1.0, 0.0, 0.0),
        );
    }

    #[test]
    fn look_at_places_target_down_negative_z() {
        let eye = Vec3::new(0.0, 0.0, -2.0);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);

        let target = view * Vec4::point(0.0, 0.0, 0.0);
        assert_vec4_eq(target, Vec4::point(0.0, 0.0, -2.0));

        let eye_in_view = view * Vec4::from(eye);
        assert_vec4_eq(eye_in_view, Vec4::point(0.0, 0.0, 0.0));

        // Looking along +Z world with +Y up, world -X is to the camera's right.
        let right = view * Vec4::point(-1.0, 0.0, 0.0);
        assert!(right.x > 0.0);
    }

    #[test]
    fn look_at_row_vector_form_has_translation_in_bottom_row() {
        let eye = Vec3::new(3.0, 1.0, -2.0);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        let row_form = view.transpose();

        let z_axis = eye.normalize();
        let x_axis = Vec3::Y.cross(z_axis).normalize();
        let y_axis = z_axis.cross(x_axis);
        assert_relative_eq!(row_form.get(3, 0), -x_axis.dot(eye), epsilon = 1e-5);
        assert_relative_eq!(row_form.get(3, 1), -y_axis.dot(eye), epsilon = 1e-5);
        assert_relative_eq!(row_form.get(3, 2), -z_axis.dot(eye), epsilon = 1e-5);
        assert_relative_eq!(row_form.get(0, 2), z_axis.x, epsilon = 1e-5);
    }

    #[test]
    fn perspective_maps_near_far_to_zero_one() {
        let proj = Mat4::perspective_rh_zo(FRAC_PI_3, 4.0 / 3.0, 1.0, 10.0);

        let near = (proj * Vec4::point(0.0, 0.0, -1.0)).perspective_divide(1e-6).unwrap();
        let far = (proj * Vec4::point(0.0, 0.0, -10.0)).perspective_divide(1e-6).unwrap();
        let mid = (proj * Vec4::point(0.0, 0.0, -3.0)).perspective_divide(1e-6).unwrap();

        assert_relative_eq!(near.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
        assert!(mid.z > near.z && mid.z < far.z);
    }

    #[test]
    fn perspective_scales_by_fov_and_aspect() {
        let proj = Mat4::perspective_rh_zo(FRAC_PI_2, 2.0, 1.0, 10.0);
        assert_relative_eq!(proj.get(1, 1), 1.0, epsilon = 1e-6);
        assert_relative_eq!(proj.get(0, 0), 0.5, epsilon = 1e-6);
        assert_relative_eq!(proj.get(3, 2), -1.0);
    }
}
