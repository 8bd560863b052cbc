pub mod error;
pub mod feed;
pub mod field_path;
pub mod refresh;
pub mod session;
pub mod settings;

pub use error::{InspectorError, Result};
pub use feed::{FeedHandle, FeedOutcome, FeedSubscription};
pub use field_path::{extract_quaternion, quaternion_from_value, resolve};
pub use refresh::{GateDecision, RefreshGate};
pub use session::Inspector;
pub use settings::{DEFAULT_REFRESH_RATE, InspectorSettings};
