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

//! Canonicalization of the stretch rotation.
//!
//! A symmetric matrix `U K Uᵀ` does not determine `U` uniquely: permuting
//! the eigenvalues together with the columns of `U`, or flipping column signs,
//! gives the same matrix. When eigenvalues repeat, any rotation inside the
//! degenerate subspace is also allowed. [`snuggle`] picks, among all these
//! equivalent choices, the rotation closest to the identity.

use strata_math::{Quaternion, Vec3, SQRT_HALF};

/// Quarter turn taking the x axis onto z.
pub const QXTOZ: Quaternion = Quaternion::new(0.0, SQRT_HALF, 0.0, SQRT_HALF);
/// Quarter turn taking the y axis onto z.
pub const QYTOZ: Quaternion = Quaternion::new(SQRT_HALF, 0.0, 0.0, SQRT_HALF);
/// Third turn, `(½, ½, -½, -½)`.
pub const QPPMM: Quaternion = Quaternion::new(0.5, 0.5, -0.5, -0.5);
/// Third turn, `(½, ½, ½, ½)`.
pub const QPPPP: Quaternion = Quaternion::new(0.5, 0.5, 0.5, 0.5);
/// Third turn, `(-½, ½, -½, -½)`.
pub const QMPMM: Quaternion = Quaternion::new(-0.5, 0.5, -0.5, -0.5);
/// Third turn, `(½, ½, ½, -½)`.
pub const QPPPM: Quaternion = Quaternion::new(0.5, 0.5, 0.5, -0.5);
/// The identity.
pub const Q0001: Quaternion = Quaternion::IDENTITY;
/// Half turn about x.
pub const Q1000: Quaternion = Quaternion::new(1.0, 0.0, 0.0, 0.0);

/// Successor of each axis in the cyclic order x, y, z.
const NEXT: [usize; 3] = [1, 2, 0];

/// How many distinct values a scale vector holds.
///
/// Equality is exact: only factors that compare equal as floats are treated
/// as repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMultiplicity {
    /// Three different factors.
    Distinct,
    /// Two equal factors; `odd_axis` is the index of the one that differs.
    Pair {
        /// Axis (0 = x, 1 = y, 2 = z) whose factor differs from the other two.
        odd_axis: usize,
    },
    /// All three factors equal.
    Uniform,
}

impl ScaleMultiplicity {
    /// Classifies the scale factors `k`.
    pub fn classify(k: Vec3) -> Self {
        if k.x == k.y {
            if k.x == k.z {
                Self::Uniform
            } else {
                Self::Pair { odd_axis: 2 }
            }
        } else if k.x == k.z {
            Self::Pair { odd_axis: 1 }
        } else if k.y == k.z {
            Self::Pair { odd_axis: 0 }
        } else {
            Self::Distinct
        }
    }
}

/// Finds the corrective rotation `p` for the stretch rotation `q` with scale `k`.
///
/// Returns `(p, k')` such that `q * p` is the equivalent rotation of smallest
/// angle and `(q·p) K' (q·p)ᵀ == q K qᵀ`. `k'` is `k` permuted to follow
/// the axes of `q * p`.
pub fn snuggle(q: Quaternion, k: Vec3) -> (Quaternion, Vec3) {
    let mut ka = k.to_array();
    let p = match ScaleMultiplicity::classify(k) {
        ScaleMultiplicity::Uniform => q.conjugate(),
        ScaleMultiplicity::Pair { odd_axis } => snuggle_pair(q, odd_axis, &mut ka),
        ScaleMultiplicity::Distinct => snuggle_distinct(q, &mut ka),
    };
    (p, Vec3::from_array(ka))
}

/// Two equal factors: any twist about the odd axis is free.
fn snuggle_pair(q: Quaternion, odd_axis: usize, ka: &mut [f32; 3]) -> Quaternion {
    // Rotate the odd axis onto z.
    let qtoz = match odd_axis {
        0 => {
            ka.swap(0, 2);
            QXTOZ
        }
        1 => {
            ka.swap(1, 2);
            QYTOZ
        }
        _ => Q0001,
    };
    let q = (q * qtoz).conjugate();

    let (x, y, z, w) = (q.x as f64, q.y as f64, q.z as f64, q.w as f64);
    let mag = [z * z + w * w - 0.5, x * z - y * w, y * z + x * w];
    let neg = mag.map(|m| m < 0.0);
    let mag = mag.map(f64::abs);

    let win = if mag[0] > mag[1] {
        if mag[0] > mag[2] {
            0
        } else {
            2
        }
    } else if mag[1] > mag[2] {
        1
    } else {
        2
    };

    let p = match win {
        0 => {
            if neg[0] {
                Q1000
            } else {
                Q0001
            }
        }
        1 => {
            ka.rotate_right(1);
            if neg[1] {
                QPPMM
            } else {
                QPPPP
            }
        }
        _ => {
            ka.rotate_left(1);
            if neg[2] {
                QMPMM
            } else {
                QPPPM
            }
        }
    };

    // Cancel the remaining twist about z.
    let qp = q * p;
    let t = (mag[win] + 0.5).sqrt() as f32;
    let p = p * Quaternion::new(0.0, 0.0, -qp.z / t, qp.w / t);
    qtoz * p.conjugate()
}

/// Distinct factors: pick the closest of the 24 axis permutations with signs.
fn snuggle_distinct(q: Quaternion, ka: &mut [f32; 3]) -> Quaternion {
    let mut qa = [q.x, q.y, q.z, q.w];
    let mut neg = [false; 4];
    let mut par = false;
    for (value, negative) in qa.iter_mut().zip(neg.iter_mut()) {
        *negative = *value < 0.0;
        if *negative {
            *value = -*value;
        }
        par ^= *negative;
    }

    // Two largest components; `hi` holds the largest.
    let mut lo = if qa[0] > qa[1] { 0 } else { 1 };
    let mut hi = if qa[2] > qa[3] { 2 } else { 3 };
    if qa[lo] > qa[hi] {
        if qa[lo ^ 1] > qa[hi] {
            hi = lo;
            lo ^= 1;
        } else {
            std::mem::swap(&mut hi, &mut lo);
        }
    } else if qa[hi ^ 1] > qa[lo] {
        lo = hi ^ 1;
    }

    let all = (qa[0] + qa[1] + qa[2] + qa[3]) * 0.5;
    let two = (qa[hi] + qa[lo]) * SQRT_HALF;
    let big = qa[hi];

    let mut pa = [0.0f32; 4];
    if all > two {
        if all > big {
            for (target, &negative) in pa.iter_mut().zip(neg.iter()) {
                *target = signed(negative, 0.5);
            }
            cycle(ka, par);
        } else {
            pa[hi] = signed(neg[hi], 1.0);
        }
    } else if two > big {
        pa[hi] = signed(neg[hi], SQRT_HALF);
        pa[lo] = signed(neg[lo], SQRT_HALF);
        if lo > hi {
            std::mem::swap(&mut hi, &mut lo);
        }
        // A w partner swaps the two axes other than the vector one.
        if hi == 3 {
            hi = NEXT[lo];
            lo = 3 - hi - lo;
        }
        ka.swap(hi, lo);
    } else {
        pa[hi] = signed(neg[hi], 1.0);
    }

    Quaternion::new(-pa[0], -pa[1], -pa[2], pa[3])
}

#[inline]
fn signed(negative: bool, value: f32) -> f32 {
    if negative {
        -value
    } else {
        value
    }
}

/// Cycles the scale axes for an all-halves candidate, left on odd parity.
#[inline]
fn cycle(ka: &mut [f32; 3], odd_parity: bool) {
    if odd_parity {
        ka.rotate_left(1);
    } else {
        ka.rotate_right(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strata_math::{Mat3, FRAC_PI_2, PI};

    fn stretch(q: Quaternion, k: Vec3) -> Mat3 {
        let u = Mat3::from_quat(q);
        u * Mat3::from_scale(k) * u.transpose()
    }

    fn assert_same_stretch(q: Quaternion, k: Vec3) {
        let (p, k2) = snuggle(q, k);
        let up = q * p;
        assert_relative_eq!(up.magnitude(), 1.0, epsilon = 1e-5);
        let a = stretch(q, k);
        let b = stretch(up, k2);
        for c in 0..3 {
            for r in 0..3 {
                assert_relative_eq!(a.cols[c][r], b.cols[c][r], epsilon = 1e-4);
            }
        }
        let mut before = k.to_array();
        let mut after = k2.to_array();
        before.sort_by(f32::total_cmp);
        after.sort_by(f32::total_cmp);
        assert_eq!(before, after);
    }

    fn sample_rotations() -> Vec<Quaternion> {
        let axes = [
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 2.0, 3.0),
            Vec3::new(0.3, -0.8, 0.5),
        ];
        let angles = [0.0, 0.4, FRAC_PI_2, 2.0, PI, 4.5];
        axes.iter()
            .flat_map(|&axis| angles.iter().map(move |&a| Quaternion::from_axis_angle(axis, a)))
            .collect()
    }

    #[test]
    fn test_classify() {
        use ScaleMultiplicity::*;
        assert_eq!(ScaleMultiplicity::classify(Vec3::new(1.0, 2.0, 3.0)), Distinct);
        assert_eq!(ScaleMultiplicity::classify(Vec3::new(2.0, 2.0, 2.0)), Uniform);
        assert_eq!(ScaleMultiplicity::classify(Vec3::new(3.0, 2.0, 2.0)), Pair { odd_axis: 0 });
        assert_eq!(ScaleMultiplicity::classify(Vec3::new(2.0, 3.0, 2.0)), Pair { odd_axis: 1 });
        assert_eq!(ScaleMultiplicity::classify(Vec3::new(2.0, 2.0, 3.0)), Pair { odd_axis: 2 });
        // Nearly equal is still distinct.
        assert_eq!(ScaleMultiplicity::classify(Vec3::new(1.0, 1.0 + 1e-6, 3.0)), Distinct);
    }

    #[test]
    fn test_constants_are_unit() {
        for q in [QXTOZ, QYTOZ, QPPMM, QPPPP, QMPMM, QPPPM, Q0001, Q1000] {
            assert_relative_eq!(q.magnitude(), 1.0, epsilon = 1e-6);
        }
        let z = QXTOZ.rotate_vec3(Vec3::X);
        assert_relative_eq!(z.z, 1.0, epsilon = 1e-6);
        let z = QYTOZ.rotate_vec3(Vec3::Y);
        assert_relative_eq!(z.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_identity_is_kept() {
        let k = Vec3::new(1.0, 2.0, 3.0);
        let (p, k2) = snuggle(Quaternion::IDENTITY, k);
        assert_relative_eq!(p.w.abs(), 1.0);
        assert_eq!(k2, k);
    }

    #[test]
    fn test_quarter_turn_becomes_axis_swap() {
        let q = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let (p, k2) = snuggle(q, Vec3::new(1.0, 2.0, 3.0));
        let up = q * p;
        assert_relative_eq!(up.dot(Quaternion::IDENTITY).abs(), 1.0, epsilon = 1e-5);
        assert_eq!(k2, Vec3::new(2.0, 1.0, 3.0));
    }

    #[test]
    fn test_uniform_scale_cancels_rotation() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 0.0, 1.0), 2.0);
        let k = Vec3::new(2.0, 2.0, 2.0);
        let (p, k2) = snuggle(q, k);
        assert_eq!(p, q.conjugate());
        assert_eq!(k2, k);
    }

    #[test]
    fn test_pair_twist_about_odd_axis_cancels() {
        for odd_axis in 0..3 {
            let mut axis = [0.0; 3];
            axis[odd_axis] = 1.0;
            let mut k = [2.0, 2.0, 2.0];
            k[odd_axis] = 3.0;
            for angle in [0.3, 1.0, 2.5] {
                let q = Quaternion::from_axis_angle(Vec3::from_array(axis), angle);
                let (p, k2) = snuggle(q, Vec3::from_array(k));
                let up = q * p;
                assert_relative_eq!(up.dot(Quaternion::IDENTITY).abs(), 1.0, epsilon = 1e-5);
                assert_eq!(k2, Vec3::from_array(k));
            }
        }
    }

    #[test]
    fn test_preserves_stretch_for_distinct_scales() {
        for k in [Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 4.0, 0.2)] {
            for q in sample_rotations() {
                assert_same_stretch(q, k);
            }
        }
    }

    #[test]
    fn test_preserves_stretch_for_repeated_scales() {
        let scales = [
            Vec3::new(1.5, 1.5, 2.5),
            Vec3::new(1.5, 2.5, 1.5),
            Vec3::new(2.5, 1.5, 1.5),
            Vec3::new(2.0, 2.0, 2.0),
        ];
        for k in scales {
            for q in sample_rotations() {
                assert_same_stretch(q, k);
                assert_same_stretch(-q, k);
            }
        }
    }
}
