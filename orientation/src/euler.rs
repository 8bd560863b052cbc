//! Euler angle types and rotation-order conventions.
//!
//! # Model
//! A [`RotationOrder`] is an axis sequence plus the frame the rotations are taken in:
//! - `Static` (extrinsic): every rotation is about a fixed world axis.
//! - `Rotating` (intrinsic): every rotation is about the already-rotated body axis.
//!
//! Orders are written with the conventional four-letter code: `s`/`r` followed by the
//! axis sequence, e.g. `rzyx` (intrinsic Z then Y then X, the usual yaw-pitch-roll) or
//! `szyx` (extrinsic Z then Y then X).
//!
//! The angles of an [`EulerAngles`] are the first, second and third rotation of the
//! sequence. They are named yaw/pitch/roll after the z-y-x orders this crate uses by
//! default.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::convert::{degrees_to_radians, radians_to_degrees};
use crate::error::{OrderParseError, Result};

/// Units an Euler triple is expressed in.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

/// Three sequential rotation angles.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    /// First rotation of the sequence (about Z for the z-y-x orders).
    pub yaw: f64,
    /// Second rotation of the sequence (about Y for the z-y-x orders).
    pub pitch: f64,
    /// Third rotation of the sequence (about X for the z-y-x orders).
    pub roll: f64,
}

impl EulerAngles {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Treats `self` as radians and returns the degrees view.
    pub fn to_degrees(self) -> Self {
        Self::new(
            radians_to_degrees(self.yaw),
            radians_to_degrees(self.pitch),
            radians_to_degrees(self.roll),
        )
    }

    /// Treats `self` as degrees and returns the radians view.
    pub fn to_radians(self) -> Self {
        Self::new(
            degrees_to_radians(self.yaw),
            degrees_to_radians(self.pitch),
            degrees_to_radians(self.roll),
        )
    }

    /// Converts a triple given in `unit` into radians.
    pub fn into_radians(self, unit: AngleUnit) -> Self {
        match unit {
            AngleUnit::Radians => self,
            AngleUnit::Degrees => self.to_radians(),
        }
    }
}

/// Tait-Bryan axis sequences (each axis used once).
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AxisSequence {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl AxisSequence {
    pub const ALL: [Self; 6] = [
        Self::Xyz,
        Self::Xzy,
        Self::Yxz,
        Self::Yzx,
        Self::Zxy,
        Self::Zyx,
    ];

    /// The same axes applied in the opposite order.
    pub const fn reversed(self) -> Self {
        match self {
            Self::Xyz => Self::Zyx,
            Self::Xzy => Self::Yzx,
            Self::Yxz => Self::Zxy,
            Self::Yzx => Self::Xzy,
            Self::Zxy => Self::Yxz,
            Self::Zyx => Self::Xyz,
        }
    }

    /// Index of the first axis (0 = x, 1 = y, 2 = z) and whether the sequence is an
    /// odd permutation of x-y-z.
    pub(crate) const fn first_axis_and_parity(self) -> (usize, bool) {
        match self {
            Self::Xyz => (0, false),
            Self::Xzy => (0, true),
            Self::Yzx => (1, false),
            Self::Yxz => (1, true),
            Self::Zxy => (2, false),
            Self::Zyx => (2, true),
        }
    }

    const fn code(self) -> &'static str {
        match self {
            Self::Xyz => "xyz",
            Self::Xzy => "xzy",
            Self::Yxz => "yxz",
            Self::Yzx => "yzx",
            Self::Zxy => "zxy",
            Self::Zyx => "zyx",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|seq| seq.code() == code)
    }
}

/// Frame the sequential rotations are applied in.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Frame {
    /// Extrinsic: rotations about the fixed world axes.
    Static,
    /// Intrinsic: rotations about the moving body axes.
    Rotating,
}

/// A complete Euler convention: which axes, in which order, in which frame.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct RotationOrder {
    pub sequence: AxisSequence,
    pub frame: Frame,
}

impl RotationOrder {
    /// Intrinsic Z-Y-X: yaw, then pitch about the new Y, then roll about the new X.
    pub const RZYX: Self = Self::new(AxisSequence::Zyx, Frame::Rotating);
    /// Extrinsic Z-Y-X: about world Z, then world Y, then world X.
    pub const SZYX: Self = Self::new(AxisSequence::Zyx, Frame::Static);
    /// Extrinsic X-Y-Z, equivalent rotation to [`Self::RZYX`] with the angles reversed.
    pub const SXYZ: Self = Self::new(AxisSequence::Xyz, Frame::Static);

    pub const fn new(sequence: AxisSequence, frame: Frame) -> Self {
        Self { sequence, frame }
    }

    /// Every supported order, static frames first.
    pub fn all() -> impl Iterator<Item = Self> {
        [Frame::Static, Frame::Rotating].into_iter().flat_map(|frame| {
            AxisSequence::ALL
                .into_iter()
                .map(move |sequence| Self::new(sequence, frame))
        })
    }

    /// Decomposes the order into the static-frame parameters the conversion math needs:
    /// first axis index, odd parity, and whether the angle triple is reversed.
    ///
    /// A rotating-frame sequence is the static-frame sequence applied in reverse.
    pub(crate) const fn parameters(self) -> (usize, bool, bool) {
        match self.frame {
            Frame::Static => {
                let (first, parity) = self.sequence.first_axis_and_parity();
                (first, parity, false)
            }
            Frame::Rotating => {
                let (first, parity) = self.sequence.reversed().first_axis_and_parity();
                (first, parity, true)
            }
        }
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = match self.frame {
            Frame::Static => 's',
            Frame::Rotating => 'r',
        };
        write!(f, "{frame}{}", self.sequence.code())
    }
}

impl FromStr for RotationOrder {
    type Err = OrderParseError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_lowercase();
        if code.len() != 4 || !code.is_ascii() {
            return Err(OrderParseError::Malformed(s.to_string()));
        }

        let (frame, axes) = code.split_at(1);
        let frame = match frame {
            "s" => Frame::Static,
            "r" => Frame::Rotating,
            _ => return Err(OrderParseError::Malformed(s.to_string())),
        };

        let sequence = AxisSequence::from_code(axes)
            .ok_or_else(|| OrderParseError::UnsupportedSequence(axes.to_string()))?;

        Ok(Self::new(sequence, frame))
    }
}

impl TryFrom<String> for RotationOrder {
    type Error = OrderParseError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RotationOrder> for String {
    fn from(order: RotationOrder) -> Self {
        order.to_string()
    }
}

/// The three conventions used by the different update paths.
///
/// Manual quaternion entry and manual Euler entry share one convention by default;
/// values arriving from a live feed are displayed with a different one.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct RotationOrders {
    /// Used to derive the Euler views after a manual quaternion (or Euler) edit.
    pub quaternion_entry: RotationOrder,
    /// Used to build a quaternion from manually entered Euler angles.
    pub euler_entry: RotationOrder,
    /// Used to derive the Euler views of feed values and of normalized readouts.
    pub feed_display: RotationOrder,
}

impl Default for RotationOrders {
    fn default() -> Self {
        Self {
            quaternion_entry: RotationOrder::RZYX,
            euler_entry: RotationOrder::RZYX,
            feed_display: RotationOrder::SZYX,
        }
    }
}
