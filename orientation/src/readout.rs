//! Text helpers for the numeric entry fields.

use crate::constants::READOUT_DECIMALS;
use crate::euler::EulerAngles;
use crate::quaternion::Quaternion;

/// Parses a user-typed number, falling back to `default` on anything that is not a
/// finite float (empty text, stray characters, `inf`, `NaN`).
pub fn parse_float(text: &str, default: f64) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => default,
    }
}

fn fmt_field(v: f64) -> String {
    // Print -0.0 as zero.
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v:.prec$}", prec = READOUT_DECIMALS)
}

/// The ten display strings of the entry panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Readout {
    pub q_x: String,
    pub q_y: String,
    pub q_z: String,
    pub q_w: String,
    pub yaw: String,
    pub pitch: String,
    pub roll: String,
    pub yaw_deg: String,
    pub pitch_deg: String,
    pub roll_deg: String,
}

impl Readout {
    pub fn new(q: Quaternion, radians: EulerAngles, degrees: EulerAngles) -> Self {
        Self {
            q_x: fmt_field(q.x),
            q_y: fmt_field(q.y),
            q_z: fmt_field(q.z),
            q_w: fmt_field(q.w),
            yaw: fmt_field(radians.yaw),
            pitch: fmt_field(radians.pitch),
            roll: fmt_field(radians.roll),
            yaw_deg: fmt_field(degrees.yaw),
            pitch_deg: fmt_field(degrees.pitch),
            roll_deg: fmt_field(degrees.roll),
        }
    }
}
