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

//! Polar decomposition `M = Q S` by scaled Newton iteration.
//!
//! The iterate converges to the orthogonal factor while its adjoint transpose
//! supplies the inverse transpose without a division by the determinant. Each
//! step is scaled by the 1- and infinity-norms of the iterate and its adjoint,
//! which keeps the iteration count small even for badly scaled inputs.
//!
//! The iteration runs in f64: the adjoint grows with the square of the input
//! scale and the scale factor mixes fourth powers of it.

use crate::config::DecomposeConfig;
use crate::error::{DecomposeError, Result};
use crate::householder;
use strata_math::{Mat3, Vec3};

/// Result of [`polar_decompose`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarDecomposition {
    /// Orthogonal factor. It may be a reflection (`det < 0`).
    pub q: Mat3,
    /// Symmetric positive semi-definite stretch factor.
    pub s: Mat3,
    /// Determinant sign carrier of `q`: the last iterate's determinant, or the
    /// determinant of the reducer's factor when the input is singular.
    pub det: f32,
    /// Number of Newton steps taken.
    pub iterations: u32,
}

/// Factors `m` into an orthogonal `q` and a symmetric positive semi-definite `s`.
///
/// Iterates on `Mᵀ` until the relative 1-norm change drops to
/// `config.polar_tolerance`. An iterate whose determinant is exactly zero
/// switches to the Householder rank reducer. Non-finite input never converges
/// and is reported as [`DecomposeError::PolarNotConverged`] once
/// `config.max_polar_iterations` is exhausted.
///
/// Singularity is detected by that exact-zero test only. A rank-deficient
/// matrix whose determinant merely rounds to a tiny nonzero value, such as a
/// rotated rank-one matrix, goes through the Newton iteration and may come back
/// with a poor factorization.
pub fn polar_decompose(m: &Mat3, config: &DecomposeConfig) -> Result<PolarDecomposition> {
    let tolerance = f64::from(config.polar_tolerance);
    let mut mk = Mat3d::from_mat3(m).transpose();
    let mut m_one = mk.norm_one();
    let mut m_inf = mk.norm_inf();
    let mut iterations = 0;

    let (mk, det) = loop {
        let madj_tk = mk.adjoint_transpose();
        let det = mk.row_dot(&madj_tk, 0);
        if det == 0.0 {
            log::debug!("Singular iterate after {iterations} polar steps, using rank reduction.");
            let reduced = householder::rank2(&mk.to_mat3(), &madj_tk.to_mat3());
            break (reduced, reduced.determinant());
        }

        iterations += 1;
        let madj_t_one = madj_tk.norm_one();
        let madj_t_inf = madj_tk.norm_inf();
        let gamma = ((madj_t_one * madj_t_inf / (m_one * m_inf)).sqrt() / det.abs()).sqrt();
        let g1 = gamma * 0.5;
        let g2 = 0.5 / (gamma * det);

        let next = mk.scaled_sum(g1, &madj_tk, g2);
        let e_one = mk.scaled_sum(1.0, &next, -1.0).norm_one();
        mk = next;
        m_one = mk.norm_one();
        m_inf = mk.norm_inf();
        log::trace!("Polar step {iterations}: |dM| = {e_one}, |M| = {m_one}");

        // An overflowing iterate gives inf <= inf, which is not convergence.
        if e_one.is_finite() && m_one.is_finite() && e_one <= m_one * tolerance {
            break (mk.to_mat3(), det as f32);
        }
        if iterations >= config.max_polar_iterations {
            let residual = (e_one / m_one) as f32;
            log::warn!(
                "Polar decomposition gave up after {iterations} iterations (residual {residual})."
            );
            return Err(DecomposeError::PolarNotConverged {
                iterations,
                residual,
            });
        }
    };

    let q = mk.transpose();
    let s = (mk * *m).symmetrize();
    Ok(PolarDecomposition {
        q,
        s,
        det,
        iterations,
    })
}

/// Column-major f64 working matrix: `cols[col][row]`.
#[derive(Clone, Copy)]
struct Mat3d {
    cols: [[f64; 3]; 3],
}

impl Mat3d {
    fn from_mat3(m: &Mat3) -> Self {
        let mut cols = [[0.0; 3]; 3];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, value) in col.iter_mut().enumerate() {
                *value = f64::from(m.cols[c][r]);
            }
        }
        Self { cols }
    }

    fn to_mat3(&self) -> Mat3 {
        let col = |c: usize| {
            let [x, y, z] = self.cols[c];
            Vec3::new(x as f32, y as f32, z as f32)
        };
        Mat3::from_cols(col(0), col(1), col(2))
    }

    fn row(&self, r: usize) -> [f64; 3] {
        [self.cols[0][r], self.cols[1][r], self.cols[2][r]]
    }

    fn transpose(&self) -> Self {
        Self {
            cols: [self.row(0), self.row(1), self.row(2)],
        }
    }

    /// Dot product of row `r` of `self` and row `r` of `other`.
    fn row_dot(&self, other: &Self, r: usize) -> f64 {
        let (a, b) = (self.row(r), other.row(r));
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Rows are `r1×r2, r2×r0, r0×r1`.
    fn adjoint_transpose(&self) -> Self {
        let cross = |a: [f64; 3], b: [f64; 3]| {
            [
                a[1] * b[2] - a[2] * b[1],
                a[2] * b[0] - a[0] * b[2],
                a[0] * b[1] - a[1] * b[0],
            ]
        };
        let (r0, r1, r2) = (self.row(0), self.row(1), self.row(2));
        Self {
            cols: [cross(r1, r2), cross(r2, r0), cross(r0, r1)],
        }
        .transpose()
    }

    /// `self * a + other * b`, element-wise.
    fn scaled_sum(&self, a: f64, other: &Self, b: f64) -> Self {
        let mut cols = self.cols;
        for (col, other_col) in cols.iter_mut().zip(other.cols.iter()) {
            for (value, other_value) in col.iter_mut().zip(other_col.iter()) {
                *value = *value * a + *other_value * b;
            }
        }
        Self { cols }
    }

    fn norm_one(&self) -> f64 {
        self.cols
            .iter()
            .map(|col| col.iter().map(|v| v.abs()).sum::<f64>())
            .fold(0.0, nan_max)
    }

    fn norm_inf(&self) -> f64 {
        self.transpose().norm_one()
    }
}

/// `max` that lets a NaN through.
fn nan_max(max: f64, x: f64) -> f64 {
    if x > max || x.is_nan() {
        x
    } else {
        max
    }
}
