/// Below this `cos(pitch)` magnitude the Euler decomposition is treated as gimbal locked.
///
/// Matches the tolerance used by the matrix-based extraction: four machine epsilons.
pub const GIMBAL_EPS: f64 = f64::EPSILON * 4.0;

/// Body-frame endpoint of the long X segment drawn for the oriented frame.
pub const FRAME_X_END: [f64; 3] = [1.0, 0.0, 0.0];

/// Body-frame endpoint of the short X segment (the "tail" of the frame diagram).
pub const FRAME_X2_END: [f64; 3] = [0.8, 0.0, 0.0];

/// Body-frame endpoint of the raised segment that marks the body's +Z side.
///
/// Both the X and X2 segments connect to this point, forming a small flag
/// whose tilt shows roll.
pub const FRAME_Z_END: [f64; 3] = [0.8, 0.0, 0.1];

/// Length of the fixed world axes drawn behind the oriented frame.
pub const REFERENCE_AXIS_LENGTH: f64 = 0.5;

/// Decimal places used by every text readout field.
pub const READOUT_DECIMALS: usize = 5;
