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

//! # Strata Decompose
//!
//! Factors an affine 4x4 transform `A` into `A = T F R U K Uᵀ`: a translation
//! `T`, a determinant sign `F`, an essential rotation `R`, and a stretch made of
//! a rotation `U` and non-negative scale factors `K`.
//!
//! The pipeline is a polar decomposition of the linear block (`M = Q S`), a
//! Jacobi eigen-decomposition of the stretch `S`, quaternion extraction for
//! both rotations, and a canonicalization step that picks the stretch rotation
//! closest to the identity.
//!
//! ```
//! use strata_decompose::{decompose_affine, Sign};
//! use strata_math::{AffineTransform, Quaternion, Vec3};
//!
//! let q = Quaternion::from_axis_angle(Vec3::Z, 0.5);
//! let t = AffineTransform::from_trs(Vec3::new(1.0, 2.0, 3.0), q, Vec3::new(2.0, 3.0, 4.0));
//! let parts = decompose_affine(&t.to_matrix()).unwrap();
//!
//! assert_eq!(parts.translation, Vec3::new(1.0, 2.0, 3.0));
//! assert_eq!(parts.sign, Sign::Positive);
//! assert!((parts.rotation.dot(q).abs() - 1.0).abs() < 1e-5);
//! ```

#![warn(missing_docs)]

pub mod affine;
pub mod config;
pub mod error;
pub mod householder;
pub mod polar;
pub mod snuggle;
pub mod spectral;

pub use self::affine::{AffineParts, Decomposer, Sign};
pub use self::config::DecomposeConfig;
pub use self::error::{DecomposeError, Result};
pub use self::polar::{polar_decompose, PolarDecomposition};
pub use self::snuggle::{snuggle, ScaleMultiplicity};
pub use self::spectral::{spectral_decompose, SpectralDecomposition};

use strata_math::Mat4;

/// Decomposes `m` with the default configuration.
///
/// See [`Decomposer::decompose`].
pub fn decompose_affine(m: &Mat4) -> Result<AffineParts> {
    Decomposer::default().decompose(m)
}
