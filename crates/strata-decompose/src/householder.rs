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

//! Householder rank reduction.
//!
//! When the polar iteration meets a singular matrix it cannot invert, these
//! routines build an orthogonal factor directly. Two Householder reflections
//! bring the matrix to a form whose non-zero part is a 2x2 (or 1x1) block,
//! which is then solved in closed form.

use strata_math::{Mat3, Vec3};

/// Returns the column holding the entry of largest magnitude, or `None` for a zero matrix.
///
/// Rows are scanned in the outer loop and only a strictly larger entry replaces
/// the current pick, so ties keep the first entry in row-major order.
pub fn max_column(m: &Mat3) -> Option<usize> {
    let mut max = 0.0;
    let mut col = None;
    for r in 0..3 {
        for c in 0..3 {
            let abs = m.cols[c][r].abs();
            if abs > max {
                max = abs;
                col = Some(c);
            }
        }
    }
    col
}

/// Builds the Householder vector `u` such that `(I - u uᵀ) v` lies along the z axis.
///
/// `u` is scaled so that `uᵀu = 2`, which makes `I - u uᵀ` a reflection.
pub fn reflector(v: Vec3) -> Vec3 {
    let s = v.length();
    let u = Vec3::new(v.x, v.y, v.z + if v.z < 0.0 { -s } else { s });
    u * (2.0 / u.length_squared()).sqrt()
}

/// Applies the reflection `I - u uᵀ` to each column of `m` (`m ← (I - u uᵀ) m`).
pub fn reflect_cols(m: &mut Mat3, u: Vec3) {
    for col in m.cols.iter_mut() {
        let s = u.dot(*col);
        *col = *col - u * s;
    }
}

/// Applies the reflection `I - u uᵀ` to each row of `m` (`m ← m (I - u uᵀ)`).
pub fn reflect_rows(m: &mut Mat3, u: Vec3) {
    for r in 0..3 {
        let s = u.dot(m.row(r));
        for c in 0..3 {
            m.cols[c][r] -= u[c] * s;
        }
    }
}

/// Orthogonal factor of a matrix of rank 1 or less.
///
/// A zero matrix yields the identity.
pub fn rank1(m: &Mat3) -> Mat3 {
    let mut q = Mat3::IDENTITY;
    let Some(col) = max_column(m) else {
        return q;
    };

    let mut m = *m;
    let v1 = reflector(m.cols[col]);
    reflect_cols(&mut m, v1);
    let v2 = reflector(m.row(2));
    reflect_rows(&mut m, v2);

    if m.cols[2].z < 0.0 {
        q.cols[2].z = -1.0;
    }
    reflect_cols(&mut q, v1);
    reflect_rows(&mut q, v2);
    q
}

/// Orthogonal factor of a matrix of rank 2 or less.
///
/// `madj_t` is the adjoint transpose of `m`. Its columns span the null space
/// complement's normal when `m` has rank 2; if it is zero the rank is lower and
/// the work is handed to [`rank1`].
pub fn rank2(m: &Mat3, madj_t: &Mat3) -> Mat3 {
    let Some(col) = max_column(madj_t) else {
        return rank1(m);
    };

    let mut m = *m;
    let v1 = reflector(madj_t.cols[col]);
    reflect_cols(&mut m, v1);
    let v2 = reflector(m.row(0).cross(m.row(1)));
    reflect_rows(&mut m, v2);

    // Upper-left 2x2 block, row-major.
    let w = m.cols[0].x;
    let x = m.cols[1].x;
    let y = m.cols[0].y;
    let z = m.cols[1].y;

    let mut q = if w * z > x * y {
        let (c, s) = normalized_pair(z + w, y - x);
        Mat3::from_cols(Vec3::new(c, s, 0.0), Vec3::new(-s, c, 0.0), Vec3::Z)
    } else {
        let (c, s) = normalized_pair(z - w, y + x);
        Mat3::from_cols(Vec3::new(-c, s, 0.0), Vec3::new(s, c, 0.0), Vec3::Z)
    };
    reflect_cols(&mut q, v1);
    reflect_rows(&mut q, v2);
    q
}

fn normalized_pair(c: f32, s: f32) -> (f32, f32) {
    let d = (c * c + s * s).sqrt();
    (c / d, s / d)
}
