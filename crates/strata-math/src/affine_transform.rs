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

//! Affine transformations in 3D space.

use super::{Mat3, Mat4, Quaternion, Vec3, Vec4};

/// Represents a 3D affine transformation (translation, rotation, scale, shear).
///
/// This is a semantic wrapper around a `Mat4` whose bottom row is `[0, 0, 0, 1]`.
/// It is the input form expected by the decomposition engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct AffineTransform(pub Mat4);

impl AffineTransform {
    /// The identity transform, which results in no change.
    pub const IDENTITY: Self = Self(Mat4::IDENTITY);

    // --- CONSTRUCTORS ---

    /// Creates an `AffineTransform` from a translation vector.
    ///
    /// # Example
    ///
    /// ```rust
    /// use strata_math::{AffineTransform, Vec3};
    ///
    /// let transform = AffineTransform::from_translation(Vec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(transform.translation(), Vec3::new(1.0, 2.0, 3.0));
    /// ```
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self(Mat4::from_translation(v))
    }

    /// Creates an `AffineTransform` from a non-uniform scale vector.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self(Mat4::from_scale(scale))
    }

    /// Creates an `AffineTransform` from a quaternion representing a rotation.
    #[inline]
    pub fn from_quat(q: Quaternion) -> Self {
        Self(Mat4::from_quat(q))
    }

    /// Creates a transform that scales, then rotates, then translates.
    ///
    /// # Arguments
    ///
    /// * `translation` - Applied last
    /// * `rotation` - The rotation, normalized before use
    /// * `scale` - Per-axis scale, applied first
    ///
    /// # Example
    ///
    /// ```rust
    /// use strata_math::{AffineTransform, Quaternion, Vec3};
    ///
    /// let t = AffineTransform::from_trs(
    ///     Vec3::new(1.0, 0.0, 0.0),
    ///     Quaternion::IDENTITY,
    ///     Vec3::new(2.0, 2.0, 2.0),
    /// );
    /// assert_eq!(t.transform_point(Vec3::ONE), Vec3::new(3.0, 2.0, 2.0));
    /// ```
    #[inline]
    pub fn from_trs(translation: Vec3, rotation: Quaternion, scale: Vec3) -> Self {
        let linear = Mat3::from_quat(rotation) * Mat3::from_scale(scale);
        Self(Mat4::from_mat3_translation(linear, translation))
    }

    // --- SEMANTIC ACCESSORS ---

    /// Converts the `AffineTransform` to a `Mat4`.
    #[inline]
    pub fn to_matrix(&self) -> Mat4 {
        self.0
    }

    /// Extracts the translation component from the affine transform.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.0.cols[3].truncate()
    }

    /// Returns the linear 3x3 block (rotation, scale and shear).
    #[inline]
    pub fn linear(&self) -> Mat3 {
        Mat3::from_mat4(&self.0)
    }

    /// Extracts the rotation component as a quaternion.
    ///
    /// # Note
    ///
    /// This assumes the linear block is a pure rotation. Use the decomposition
    /// engine for transforms that also scale, shear or reflect.
    #[inline]
    pub fn rotation(&self) -> Quaternion {
        Quaternion::from_rotation_matrix(&self.0)
    }

    /// Transforms a point, applying the translation.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (self.0 * Vec4::from_vec3(p, 1.0)).truncate()
    }

    /// Transforms a direction, ignoring the translation.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.linear() * v
    }
}

impl Default for AffineTransform {
    /// Returns the identity `AffineTransform`.
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<AffineTransform> for Mat4 {
    /// Converts the `AffineTransform` into its inner `Mat4`.
    #[inline]
    fn from(transform: AffineTransform) -> Self {
        transform.0
    }
}

impl From<Mat4> for AffineTransform {
    /// Converts a `Mat4` into an `AffineTransform`.
    ///
    /// # Panics
    ///
    /// Panics if the bottom row of the matrix is not `[0, 0, 0, 1]`.
    #[inline]
    fn from(val: Mat4) -> Self {
        let last_row = val.get_row(3);
        assert!(
            last_row == Vec4::W,
            "Matrix is not a valid affine transformation"
        );
        AffineTransform(val)
    }
}
