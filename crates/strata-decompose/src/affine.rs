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

//! Decomposition of affine transforms into translation, rotation and stretch.

use crate::config::DecomposeConfig;
use crate::error::Result;
use crate::polar::polar_decompose;
use crate::snuggle::snuggle;
use crate::spectral::spectral_decompose;
use strata_math::{AffineTransform, Mat3, Mat4, Quaternion, Vec3};

/// Sign of the determinant of the linear part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    /// Proper transform, `det > 0`. For singular input, the sign of the reducer's factor.
    #[default]
    Positive,
    /// The transform contains a reflection, `det < 0`.
    Negative,
}

impl Sign {
    /// Returns `1.0` or `-1.0`.
    #[inline]
    pub fn value(self) -> f32 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// The factors of an affine transform `A = T F R U K Uᵀ`.
///
/// `T` is the translation, `F` the sign, `R` the rotation, `U` the stretch
/// rotation and `K` the diagonal scale. `U` is chosen as close to the identity
/// as the scale allows, so for a transform without shear it is the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineParts {
    /// Translation `T`.
    pub translation: Vec3,
    /// Essential rotation `R`.
    pub rotation: Quaternion,
    /// Stretch rotation `U`, the frame in which `scale` applies.
    pub stretch_rotation: Quaternion,
    /// Non-negative stretch factors `K`.
    pub scale: Vec3,
    /// Determinant sign `F`.
    pub sign: Sign,
}

impl Default for AffineParts {
    /// The parts of the identity transform.
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
            stretch_rotation: Quaternion::IDENTITY,
            scale: Vec3::ONE,
            sign: Sign::Positive,
        }
    }
}

impl AffineParts {
    /// Recomposes the linear 3x3 block `F R U K Uᵀ`.
    pub fn linear(&self) -> Mat3 {
        let u = Mat3::from_quat(self.stretch_rotation);
        Mat3::from_quat(self.rotation) * u * Mat3::from_scale(self.scale) * u.transpose()
            * self.sign.value()
    }

    /// Recomposes the full affine matrix.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_mat3_translation(self.linear(), self.translation)
    }

    /// Recomposes the transform as an [`AffineTransform`].
    pub fn to_transform(&self) -> AffineTransform {
        AffineTransform(self.to_matrix())
    }

    /// Returns the parts of the inverse transform without decomposing again.
    ///
    /// A zero scale factor stays zero, so a singular transform yields the
    /// pseudo-inverse restricted to its range.
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.conjugate();
        let stretch_rotation = self.rotation * self.stretch_rotation;
        let scale = Vec3::new(
            reciprocal_or_zero(self.scale.x),
            reciprocal_or_zero(self.scale.y),
            reciprocal_or_zero(self.scale.z),
        );

        let t = stretch_rotation.conjugate().rotate_vec3(-self.translation) * scale;
        let translation = (rotation * stretch_rotation).rotate_vec3(t) * self.sign.value();

        Self {
            translation,
            rotation,
            stretch_rotation,
            scale,
            sign: self.sign,
        }
    }
}

#[inline]
fn reciprocal_or_zero(k: f32) -> f32 {
    if k == 0.0 {
        0.0
    } else {
        1.0 / k
    }
}

/// Decomposes affine transforms with a fixed, validated configuration.
///
/// A `Decomposer` holds no state between calls and can be shared across
/// threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Decomposer {
    config: DecomposeConfig,
}

impl Decomposer {
    /// Creates a decomposer, rejecting an out-of-range configuration.
    pub fn new(config: DecomposeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &DecomposeConfig {
        &self.config
    }

    /// Factors `m` into [`AffineParts`].
    ///
    /// `m` is assumed affine; its bottom row is not read. Fails only when the
    /// polar iteration does not converge, which includes non-finite input.
    pub fn decompose(&self, m: &Mat4) -> Result<AffineParts> {
        let translation = m.cols[3].truncate();

        let polar = polar_decompose(&Mat3::from_mat4(m), &self.config)?;
        let (q, sign) = if polar.det < 0.0 {
            (-polar.q, Sign::Negative)
        } else {
            (polar.q, Sign::Positive)
        };
        let rotation = Quaternion::from_mat3(&q);

        let spectral = spectral_decompose(&polar.s, &self.config);
        // Round-off can leave a null eigenvalue slightly negative.
        let k = spectral.eigenvalues;
        let k = Vec3::new(k.x.max(0.0), k.y.max(0.0), k.z.max(0.0));
        let stretch = Quaternion::from_mat3(&spectral.eigenvectors);

        let (p, scale) = snuggle(stretch, k);
        let stretch_rotation = stretch * p;

        log::trace!(
            "Decomposed in {} polar steps and {} Jacobi sweeps: scale {:?}, sign {:?}",
            polar.iterations,
            spectral.sweeps,
            scale,
            sign
        );
        Ok(AffineParts {
            translation,
            rotation,
            stretch_rotation,
            scale,
            sign,
        })
    }

    /// Factors an [`AffineTransform`].
    pub fn decompose_transform(&self, transform: &AffineTransform) -> Result<AffineParts> {
        self.decompose(&transform.0)
    }
}
