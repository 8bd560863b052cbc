use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// 3D vector used for frame endpoints and rotated vectors.
pub type Vec3 = Vector3<f64>;

/// A quaternion (w + xi + yj + zk), stored as four `f64` scalars.
///
/// Semantics:
/// - Stored in `(x, y, z, w)` order to match the middleware message layout.
/// - Not guaranteed to be unit length. Normalization is an explicit step
///   (see [`crate::convert::normalize`]), never done on construction.
/// - This is a plain data type; the math lives in [`crate::convert`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    /// Vector part (imaginary i)
    pub x: f64,
    /// Vector part (imaginary j)
    pub y: f64,
    /// Vector part (imaginary k)
    pub z: f64,
    /// Scalar part (real) - Set to 1.0 for Identity
    pub w: f64,
}

impl Quaternion {
    /// The "No Rotation" quaternion.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[inline(always)]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Largest absolute component.
    pub fn max_abs(&self) -> f64 {
        self.x
            .abs()
            .max(self.y.abs())
            .max(self.z.abs())
            .max(self.w.abs())
    }

    /// Euclidean length. Components are rescaled by [`Self::max_abs`] first, so values
    /// near the ends of the `f64` range neither overflow nor underflow.
    pub fn norm(&self) -> f64 {
        let s = self.max_abs();
        if s == 0.0 || !s.is_finite() {
            return s;
        }
        s * self.unscaled(s).norm_squared().sqrt()
    }

    /// Every component divided by `d`.
    pub(crate) fn unscaled(self, d: f64) -> Self {
        Self::new(self.x / d, self.y / d, self.z / d, self.w / d)
    }

    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Components in `[x, y, z, w]` order.
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f64; 4]> for Quaternion {
    /// Reads `[x, y, z, w]`.
    fn from([x, y, z, w]: [f64; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

impl From<Quaternion> for nalgebra::Quaternion<f64> {
    #[inline(always)]
    fn from(q: Quaternion) -> Self {
        // nalgebra: Quaternion::new(w, i, j, k)
        nalgebra::Quaternion::new(q.w, q.x, q.y, q.z)
    }
}

impl From<nalgebra::Quaternion<f64>> for Quaternion {
    #[inline(always)]
    fn from(q: nalgebra::Quaternion<f64>) -> Self {
        Self::new(q.i, q.j, q.k, q.w)
    }
}

impl From<UnitQuaternion<f64>> for Quaternion {
    #[inline(always)]
    fn from(uq: UnitQuaternion<f64>) -> Self {
        uq.into_inner().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        assert_eq!(Quaternion::default(), Quaternion::IDENTITY);
        assert_eq!(Quaternion::IDENTITY.to_array(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn nalgebra_layout_puts_scalar_first() {
        // nalgebra's constructor takes w first; our struct keeps w last.
        let q = Quaternion::new(0.1, 0.2, 0.3, 0.4);
        let na: nalgebra::Quaternion<f64> = q.into();
        assert_eq!(na.w, 0.4);
        assert_eq!(na.i, 0.1);
        assert_eq!(na.j, 0.2);
        assert_eq!(na.k, 0.3);
        assert_eq!(Quaternion::from(na), q);
    }

    #[test]
    fn conjugate_flips_vector_part_only() {
        let q = Quaternion::new(1.0, -2.0, 3.0, 4.0);
        assert_eq!(q.conjugate(), Quaternion::new(-1.0, 2.0, -3.0, 4.0));
        assert_eq!(q.norm_squared(), 30.0);
    }

    #[test]
    fn norm_survives_extreme_magnitudes() {
        let big = Quaternion::new(0.0, 0.0, 3.0e200, 4.0e200);
        assert_eq!(big.max_abs(), 4.0e200);
        assert!((big.norm() / 5.0e200 - 1.0).abs() < 1.0e-12);

        let tiny = Quaternion::new(3.0e-170, 0.0, 0.0, -4.0e-170);
        assert!((tiny.norm() / 5.0e-170 - 1.0).abs() < 1.0e-12);

        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 0.0).norm(), 0.0);
    }
}
