//! Quaternion / Euler conversion engine.
//!
//! Every function here is total over finite input. The only degenerate case is a
//! zero-norm quaternion, which [`normalize`] maps to identity.
//!
//! # Euler extraction
//! [`quaternion_to_euler`] works on the rotation matrix `M` of the normalized
//! quaternion. For a static-frame order with first axis `i` and odd/even parity, the
//! remaining axes are `j = NEXT_AXIS[i + parity]` and `k = NEXT_AXIS[i - parity + 1]`:
//! - `a0 = atan2(M[k][j], M[k][k])`
//! - `a1 = atan2(-M[k][i], hypot(M[i][i], M[j][i]))`
//! - `a2 = atan2(M[j][i], M[i][i])`
//!
//! Odd parity negates the triple; a rotating frame swaps `a0` and `a2`. Near gimbal
//! lock the first and third axes coincide and the third angle is pinned to zero.

use nalgebra::UnitQuaternion;

use crate::constants::GIMBAL_EPS;
use crate::euler::{EulerAngles, RotationOrder};
use crate::quaternion::{Quaternion, Vec3};

/// Axis that follows a given axis in the cyclic x -> y -> z -> x sequence.
const NEXT_AXIS: [usize; 4] = [1, 2, 0, 1];

/// Scales `q` to unit norm.
///
/// A zero-norm quaternion has no direction; it is replaced with identity instead of
/// producing NaNs. Any other finite input is divided by its largest component before
/// the norm is taken, so `1e200` or `1e-170` entries still come out unit length.
pub fn normalize(q: Quaternion) -> Quaternion {
    let s = q.max_abs();
    if s == 0.0 {
        return Quaternion::IDENTITY;
    }

    let q = q.unscaled(s);
    q.unscaled(q.norm_squared().sqrt())
}

/// Decomposes `q` into three angles following `order`.
///
/// `q` does not have to be unit length; any non-zero scaling gives the same angles.
pub fn quaternion_to_euler(q: Quaternion, order: RotationOrder) -> EulerAngles {
    let raw: nalgebra::Quaternion<f64> = normalize(q).into();
    let unit = UnitQuaternion::new_unchecked(raw);
    let rotation = unit.to_rotation_matrix();
    let m = rotation.matrix();

    let (i, parity, rotating) = order.parameters();
    let p = parity as usize;
    let j = NEXT_AXIS[i + p];
    let k = NEXT_AXIS[i + 1 - p];

    let cy = m[(i, i)].hypot(m[(j, i)]);
    let (mut a0, mut a1, mut a2) = if cy > GIMBAL_EPS {
        (
            m[(k, j)].atan2(m[(k, k)]),
            (-m[(k, i)]).atan2(cy),
            m[(j, i)].atan2(m[(i, i)]),
        )
    } else {
        ((-m[(j, k)]).atan2(m[(j, j)]), (-m[(k, i)]).atan2(cy), 0.0)
    };

    if parity {
        (a0, a1, a2) = (-a0, -a1, -a2);
    }
    if rotating {
        std::mem::swap(&mut a0, &mut a2);
    }

    EulerAngles::new(a0, a1, a2)
}

/// Builds the unit quaternion for three angles applied in `order`.
pub fn euler_to_quaternion(yaw: f64, pitch: f64, roll: f64, order: RotationOrder) -> Quaternion {
    let (i, parity, rotating) = order.parameters();
    let p = parity as usize;
    let j = NEXT_AXIS[i + p];
    let k = NEXT_AXIS[i + 1 - p];

    let (mut ai, mut aj, mut ak) = (yaw, pitch, roll);
    if rotating {
        std::mem::swap(&mut ai, &mut ak);
    }
    if parity {
        aj = -aj;
    }

    let (si, ci) = (ai * 0.5).sin_cos();
    let (sj, cj) = (aj * 0.5).sin_cos();
    let (sk, ck) = (ak * 0.5).sin_cos();
    let cc = ci * ck;
    let cs = ci * sk;
    let sc = si * ck;
    let ss = si * sk;

    let mut v = [0.0; 3];
    v[i] = cj * sc - sj * cs;
    v[j] = cj * ss + sj * cc;
    v[k] = cj * cs - sj * sc;
    if parity {
        v[j] = -v[j];
    }

    Quaternion::new(v[0], v[1], v[2], cj * cc + sj * ss)
}

/// Rotates `v` by `q` as `q * (0, v) * conjugate(q)`.
///
/// Only a unit `q` preserves the length of `v`.
pub fn rotate_vector(q: Quaternion, v: Vec3) -> Vec3 {
    let q: nalgebra::Quaternion<f64> = q.into();
    let pure = nalgebra::Quaternion::from_imag(v);
    (q * pure * q.conjugate()).imag()
}

#[inline]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}
