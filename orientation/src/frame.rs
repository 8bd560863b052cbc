use crate::constants::{FRAME_X2_END, FRAME_X_END, FRAME_Z_END, REFERENCE_AXIS_LENGTH};
use crate::convert::{normalize, rotate_vector};
use crate::quaternion::{Quaternion, Vec3};

/// Endpoints of the oriented frame diagram, in world space.
///
/// The renderer draws three segments:
/// - `origin -> x_axis_end`
/// - `z_axis_end -> x_axis_end`
/// - `z_axis_end -> x2_axis_end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSegments {
    pub origin: Vec3,
    pub x_axis_end: Vec3,
    pub z_axis_end: Vec3,
    pub x2_axis_end: Vec3,
}

impl FrameSegments {
    /// Rotates the body-frame endpoints by `q`, normalizing it first.
    pub fn from_quaternion(q: Quaternion) -> Self {
        let q = normalize(q);
        Self {
            origin: Vec3::zeros(),
            x_axis_end: rotate_vector(q, Vec3::from(FRAME_X_END)),
            z_axis_end: rotate_vector(q, Vec3::from(FRAME_Z_END)),
            x2_axis_end: rotate_vector(q, Vec3::from(FRAME_X2_END)),
        }
    }

    /// The three `(start, end)` pairs in draw order.
    pub fn lines(&self) -> [(Vec3, Vec3); 3] {
        [
            (self.origin, self.x_axis_end),
            (self.z_axis_end, self.x_axis_end),
            (self.z_axis_end, self.x2_axis_end),
        ]
    }
}

impl Default for FrameSegments {
    fn default() -> Self {
        Self::from_quaternion(Quaternion::IDENTITY)
    }
}

/// Fixed world X/Y/Z axes drawn behind the oriented frame, as `(start, end)` pairs.
pub fn reference_axes() -> [(Vec3, Vec3); 3] {
    [Vec3::x(), Vec3::y(), Vec3::z()].map(|axis| (Vec3::zeros(), axis * REFERENCE_AXIS_LENGTH))
}
