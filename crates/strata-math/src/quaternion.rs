// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides a Quaternion type for representing 3D rotations.

use super::{Mat3, Mat4, Vec3, EPSILON};
use std::ops::{Add, Mul, Neg};

/// Represents a quaternion for 3D rotations.
///
/// A quaternion is stored as `(x, y, z, w)`, where `[x, y, z]` is the "vector" part
/// and `w` is the "scalar" part. Rotations are unit quaternions, where
/// `x² + y² + z² + w² = 1`; `q` and `-q` describe the same rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar (real) part.
    pub w: f32,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion representing a rotation around a given axis by a given angle.
    ///
    /// # Arguments
    ///
    /// * `axis`: The axis of rotation. It is normalized before use.
    /// * `angle_radians`: The angle of rotation in radians.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let normalized_axis = axis.normalize();
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Self {
            x: normalized_axis.x * s,
            y: normalized_axis.y * s,
            z: normalized_axis.z * s,
            w: c,
        }
    }

    /// Extracts the unit quaternion of a rotation matrix.
    ///
    /// Reads the upper 3x3 block, which must be a proper rotation. When the trace is
    /// negative the largest diagonal element selects the branch, which keeps the
    /// square root argument away from zero (a half turn yields `(0, 0, 1, 0)` for
    /// `diag(-1, -1, 1)`). If `m[3][3]` is not 1 the result is divided by
    /// `sqrt(m[3][3])`, as for a homogeneously scaled matrix.
    pub fn from_rotation_matrix(m: &Mat4) -> Self {
        // Row-major accessor: e(r, c) is row r, column c.
        let e = |r: usize, c: usize| m.cols[c].get(r);
        let m33 = e(3, 3);
        let trace = e(0, 0) + e(1, 1) + e(2, 2);

        let mut q = if trace >= 0.0 {
            let s = (trace + m33).sqrt();
            let f = 0.5 / s;
            Self {
                x: (e(2, 1) - e(1, 2)) * f,
                y: (e(0, 2) - e(2, 0)) * f,
                z: (e(1, 0) - e(0, 1)) * f,
                w: s * 0.5,
            }
        } else {
            let mut h = 0;
            if e(1, 1) > e(0, 0) {
                h = 1;
            }
            if e(2, 2) > e(h, h) {
                h = 2;
            }
            // (i, j, k) is a cyclic permutation starting at the dominant axis.
            let (i, j, k) = (h, (h + 1) % 3, (h + 2) % 3);
            let s = ((e(i, i) - (e(j, j) + e(k, k))) + m33).sqrt();
            let f = 0.5 / s;
            let mut v = [0.0f32; 3];
            v[i] = s * 0.5;
            v[j] = (e(i, j) + e(j, i)) * f;
            v[k] = (e(k, i) + e(i, k)) * f;
            Self {
                x: v[0],
                y: v[1],
                z: v[2],
                w: (e(k, j) - e(j, k)) * f,
            }
        };

        if m33 != 1.0 {
            q = q * (1.0 / m33.sqrt());
        }
        q
    }

    /// Extracts the unit quaternion of a 3x3 rotation matrix.
    #[inline]
    pub fn from_mat3(m: &Mat3) -> Self {
        Self::from_rotation_matrix(&m.to_mat4())
    }

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a normalized version of the quaternion with a length of 1.
    /// If the quaternion has a near-zero magnitude, it returns the identity quaternion.
    pub fn normalize(&self) -> Self {
        let mag_sq = self.magnitude_squared();
        if mag_sq > EPSILON {
            *self * (1.0 / mag_sq.sqrt())
        } else {
            Self::IDENTITY
        }
    }

    /// Computes the conjugate of the quaternion, which negates the vector part.
    /// For a unit quaternion this is the inverse rotation.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Rotates a 3D vector by this quaternion.
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let s: f32 = self.w;
        2.0 * u.dot(v) * u + (s * s - u.dot(u)) * v + 2.0 * s * u.cross(v)
    }

    /// Returns the rotation as a 3x3 matrix.
    #[inline]
    pub fn to_mat3(&self) -> Mat3 {
        Mat3::from_quat(*self)
    }
}

// --- Operator Overloads ---

impl Default for Quaternion {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    /// Combines two rotations using the Hamilton product.
    /// `a * b` applies `b` first, then `a`.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;
    /// Rotates a `Vec3` by this quaternion.
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.normalize().rotate_vec3(rhs)
    }
}

impl Add<Quaternion> for Quaternion {
    type Output = Self;
    /// Adds two quaternions component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: self.w + rhs.w,
        }
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    /// Scales all components of the quaternion by a scalar.
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
            w: self.w * scalar,
        }
    }
}

impl Neg for Quaternion {
    type Output = Self;
    /// Negates all components. The result describes the same rotation.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Vec4, FRAC_PI_2, PI};
    use approx::assert_relative_eq;

    fn quat_approx_eq(q1: Quaternion, q2: Quaternion) -> bool {
        let dot = q1.dot(q2).abs();
        approx::relative_eq!(dot, 1.0, epsilon = EPSILON * 10.0)
    }

    #[test]
    fn test_identity_and_default() {
        let q_ident = Quaternion::IDENTITY;
        assert_eq!(q_ident, Quaternion::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(Quaternion::default(), q_ident);
        assert_relative_eq!(q_ident.magnitude(), 1.0);
    }

    #[test]
    fn test_from_axis_angle() {
        let angle = FRAC_PI_2;
        let q = Quaternion::from_axis_angle(Vec3::new(0.0, 0.0, 3.0), angle);
        let half = angle * 0.5;
        assert_relative_eq!(q.x, 0.0);
        assert_relative_eq!(q.y, 0.0);
        assert_relative_eq!(q.z, half.sin(), epsilon = EPSILON);
        assert_relative_eq!(q.w, half.cos(), epsilon = EPSILON);
        assert_relative_eq!(q.magnitude(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_from_rotation_matrix_identity() {
        let q = Quaternion::from_rotation_matrix(&Mat4::IDENTITY);
        assert_eq!(q, Quaternion::IDENTITY);
    }

    #[test]
    fn test_from_rotation_matrix_simple_rotations() {
        let angle = std::f32::consts::FRAC_PI_4;
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            let expected = Quaternion::from_axis_angle(axis, angle);
            let m = Mat4::from_quat(expected);
            let q = Quaternion::from_rotation_matrix(&m);
            assert!(quat_approx_eq(q, expected));
            assert_relative_eq!(q.magnitude(), 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_from_rotation_matrix_half_turns() {
        // Half turns have a trace of -1 and hit every branch of the negative-trace path.
        let cases = [
            (Vec3::new(1.0, -1.0, -1.0), Quaternion::new(1.0, 0.0, 0.0, 0.0)),
            (Vec3::new(-1.0, 1.0, -1.0), Quaternion::new(0.0, 1.0, 0.0, 0.0)),
            (Vec3::new(-1.0, -1.0, 1.0), Quaternion::new(0.0, 0.0, 1.0, 0.0)),
        ];
        for (diag, expected) in cases {
            let q = Quaternion::from_rotation_matrix(&Mat4::from_scale(diag));
            assert_eq!(q, expected);
        }
    }

    #[test]
    fn test_from_rotation_matrix_large_angle() {
        let axis = Vec3::new(-1.0, 2.5, 0.7).normalize();
        let q_orig = Quaternion::from_axis_angle(axis, 2.9);
        let m = Mat4::from_quat(q_orig);
        assert!(m.cols[0].x + m.cols[1].y + m.cols[2].z < 0.0);

        let q_from_m = Quaternion::from_rotation_matrix(&m);
        assert!(quat_approx_eq(q_orig, q_from_m));

        let v = Vec3::new(1.0, 1.0, 1.0);
        let v_rot_orig = m * Vec4::from_vec3(v, 1.0);
        let v_rot_new = q_from_m.rotate_vec3(v);
        assert_relative_eq!(v_rot_orig.x, v_rot_new.x, epsilon = 1e-4);
        assert_relative_eq!(v_rot_orig.y, v_rot_new.y, epsilon = 1e-4);
        assert_relative_eq!(v_rot_orig.z, v_rot_new.z, epsilon = 1e-4);
    }

    #[test]
    fn test_from_rotation_matrix_homogeneous_scale() {
        let q_orig = Quaternion::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.6);
        let mut m = Mat4::from_quat(q_orig);
        for col in m.cols.iter_mut() {
            *col = *col * 4.0;
        }
        let q = Quaternion::from_rotation_matrix(&m);
        assert_relative_eq!(q.magnitude(), 1.0, epsilon = EPSILON);
        assert!(quat_approx_eq(q, q_orig));
    }

    #[test]
    fn test_from_mat3() {
        let q_orig = Quaternion::from_axis_angle(Vec3::new(0.3, -0.2, 0.9), -1.2);
        let q = Quaternion::from_mat3(&q_orig.to_mat3());
        assert!(quat_approx_eq(q, q_orig));
    }

    #[test]
    fn test_conjugate_is_inverse_rotation() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 0.5);
        let product = q * q.conjugate();
        assert!(quat_approx_eq(product, Quaternion::IDENTITY));

        let v = Vec3::new(0.5, -1.0, 2.0);
        let back = q.conjugate().rotate_vec3(q.rotate_vec3(v));
        assert_relative_eq!(back.x, v.x, epsilon = EPSILON);
        assert_relative_eq!(back.y, v.y, epsilon = EPSILON);
        assert_relative_eq!(back.z, v.z, epsilon = EPSILON);
    }

    #[test]
    fn test_multiplication_composition() {
        let q_x = Quaternion::from_axis_angle(Vec3::X, FRAC_PI_2);
        let q_y = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let combined = q_y * q_x;

        // X then Y: the Z axis goes to -Y, then stays at -Y.
        let v = combined * Vec3::Z;
        assert_relative_eq!(v.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(v.y, -1.0, epsilon = EPSILON);
        assert_relative_eq!(v.z, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_negation_same_rotation() {
        let q = Quaternion::from_axis_angle(Vec3::Y, PI / 3.0);
        let v = Vec3::new(1.0, 2.0, 3.0);
        let a = q.rotate_vec3(v);
        let b = (-q).rotate_vec3(v);
        assert_relative_eq!(a.x, b.x, epsilon = EPSILON);
        assert_relative_eq!(a.y, b.y, epsilon = EPSILON);
        assert_relative_eq!(a.z, b.z, epsilon = EPSILON);
    }

    #[test]
    fn test_normalize_zero_quaternion() {
        let q_zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(q_zero.normalize(), Quaternion::IDENTITY);
        let q = Quaternion::new(0.0, 3.0, 0.0, 4.0).normalize();
        assert_relative_eq!(q.y, 0.6, epsilon = EPSILON);
        assert_relative_eq!(q.w, 0.8, epsilon = EPSILON);
        let sum = q + q;
        assert_relative_eq!(sum.w, 1.6, epsilon = EPSILON);
    }
}
