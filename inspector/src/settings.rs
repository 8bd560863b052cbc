/*!
Inspector settings.

Everything a session needs to know to pick a topic, find the quaternion inside its
messages and decide how often to redraw. How these values are stored between runs is
up to the host; the serde derives only fix their shape. Missing fields fall back to
the defaults below.
*/

use std::time::Duration;

use orientation::RotationOrders;
use serde::{Deserialize, Serialize};

use crate::error::{InspectorError, Result};

/// Redraws per second applied to feed values when nothing else is configured.
pub const DEFAULT_REFRESH_RATE: f64 = 5.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InspectorSettings {
    /// Topic to subscribe to, e.g. `/imu/data`.
    pub topic_name: String,
    /// Message type of that topic, e.g. `sensor_msgs/Imu`. Informational only.
    pub topic_type: String,
    /// `/`-separated path from the message root to the quaternion field.
    pub topic_content: String,
    /// Maximum number of feed values applied per second.
    pub refresh_rate: f64,
    /// Manual entry (true) or live feed (false).
    pub manual_mode: bool,
    /// Euler conventions for the three update paths.
    pub orders: RotationOrders,
}

impl Default for InspectorSettings {
    fn default() -> Self {
        Self {
            topic_name: String::new(),
            topic_type: String::new(),
            topic_content: String::new(),
            refresh_rate: DEFAULT_REFRESH_RATE,
            manual_mode: true,
            orders: RotationOrders::default(),
        }
    }
}

impl InspectorSettings {
    /// Rejects refresh rates that cannot produce a period.
    pub fn validate(&self) -> Result<()> {
        if !self.refresh_rate.is_finite() || self.refresh_rate <= 0.0 {
            return Err(InspectorError::invalid_settings(format!(
                "refresh rate must be a positive number, got {}",
                self.refresh_rate
            )));
        }
        Ok(())
    }

    /// Minimum time between two applied feed values.
    pub fn refresh_period(&self) -> Result<Duration> {
        self.validate()?;
        Ok(Duration::from_secs_f64(1.0 / self.refresh_rate))
    }

    /// Whether there is enough information to subscribe.
    pub fn has_feed_target(&self) -> bool {
        !self.topic_name.is_empty() && !self.topic_content.is_empty()
    }
}
