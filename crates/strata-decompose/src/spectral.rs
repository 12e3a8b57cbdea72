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

//! Symmetric eigen-decomposition by cyclic Jacobi rotations.
//!
//! All matrices use column-major layout: `m[col][row]`.

use crate::config::DecomposeConfig;
use strata_math::{Mat3, Vec3};

/// Successor of each axis in the cyclic order x, y, z.
const NEXT: [usize; 3] = [1, 2, 0];

/// Result of [`spectral_decompose`]: `S = U · diag(K) · Uᵀ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralDecomposition {
    /// Eigenvalues `K`, in the order of the eigenvector columns.
    pub eigenvalues: Vec3,
    /// Eigenvectors `U` as columns. `U` is a product of plane rotations, so it is
    /// a proper rotation.
    pub eigenvectors: Mat3,
    /// Number of sweeps that had off-diagonal mass left to eliminate.
    pub sweeps: u32,
}

/// Diagonalizes the symmetric matrix `m`.
///
/// Only the diagonal and the upper/lower pairs `S[y][z]`, `S[z][x]`, `S[x][y]`
/// are read. Running out of sweeps is not an error: the result is the best
/// diagonalization found and the leftover off-diagonal mass is logged.
pub fn spectral_decompose(m: &Mat3, config: &DecomposeConfig) -> SpectralDecomposition {
    // Work in f64 for numerical stability
    let mut diag = [m.cols[0].x as f64, m.cols[1].y as f64, m.cols[2].z as f64];
    // off_diag[i] couples the two axes other than i.
    let mut off_diag = [m.cols[2].y as f64, m.cols[0].z as f64, m.cols[1].x as f64];
    let mut u_cols = [[1.0f64, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let mut sweeps = 0;

    while sweeps < config.max_jacobi_sweeps && off_diagonal_mass(&off_diag) != 0.0 {
        for i in (0..3).rev() {
            let p = NEXT[i];
            let q = NEXT[p];
            let fabs_off_diag = off_diag[i].abs();
            if fabs_off_diag <= 0.0 {
                continue;
            }
            let g = 100.0 * fabs_off_diag;
            let h = diag[q] - diag[p];
            let fabs_h = h.abs();
            let t = if fabs_h + g == fabs_h {
                off_diag[i] / h
            } else {
                let theta = 0.5 * h / off_diag[i];
                let t = 1.0 / (theta.abs() + (theta * theta + 1.0).sqrt());
                if theta < 0.0 {
                    -t
                } else {
                    t
                }
            };
            let c = 1.0 / (t * t + 1.0).sqrt();
            let s = t * c;
            let tau = s / (c + 1.0);
            let ta = t * off_diag[i];
            off_diag[i] = 0.0;
            diag[p] -= ta;
            diag[q] += ta;
            let off_diag_q = off_diag[q];
            off_diag[q] -= s * (off_diag[p] + tau * off_diag[q]);
            off_diag[p] += s * (off_diag_q - tau * off_diag[p]);
            for j in (0..3).rev() {
                let a = u_cols[p][j];
                let b = u_cols[q][j];
                u_cols[p][j] -= s * (b + tau * a);
                u_cols[q][j] += s * (a - tau * b);
            }
        }
        sweeps += 1;
    }

    let residual = off_diagonal_mass(&off_diag);
    if residual != 0.0 {
        log::debug!("Jacobi stopped after {sweeps} sweeps with off-diagonal residual {residual}.");
    } else {
        log::trace!("Jacobi converged in {sweeps} sweeps.");
    }

    let to_vec3 = |c: [f64; 3]| Vec3::new(c[0] as f32, c[1] as f32, c[2] as f32);
    SpectralDecomposition {
        eigenvalues: to_vec3(diag),
        eigenvectors: Mat3::from_cols(to_vec3(u_cols[0]), to_vec3(u_cols[1]), to_vec3(u_cols[2])),
        sweeps,
    }
}

fn off_diagonal_mass(off_diag: &[f64; 3]) -> f64 {
    off_diag.iter().map(|v| v.abs()).sum()
}
