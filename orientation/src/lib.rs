pub mod constants;
pub mod convert;
pub mod error;
pub mod euler;
pub mod frame;
pub mod quaternion;
pub mod readout;
pub mod shared;
pub mod state;

pub use constants::{FRAME_X2_END, FRAME_X_END, FRAME_Z_END, REFERENCE_AXIS_LENGTH};
pub use convert::{
    degrees_to_radians, euler_to_quaternion, normalize, quaternion_to_euler, radians_to_degrees,
    rotate_vector,
};
pub use error::OrderParseError;
pub use euler::{AngleUnit, AxisSequence, EulerAngles, Frame, RotationOrder, RotationOrders};
pub use frame::{FrameSegments, reference_axes};
pub use quaternion::{Quaternion, Vec3};
pub use readout::{Readout, parse_float};
pub use shared::SharedOrientation;
pub use state::{ObserverId, OrientationSnapshot, OrientationState, UpdateSource};
