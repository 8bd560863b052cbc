//! Live feed subscription.
//!
//! The transport hands every received message to [`FeedSubscription::on_message`],
//! possibly from its own delivery thread. A subscription applies at most one value per
//! refresh period and stops for good the first time a message does not contain a
//! quaternion at the configured path, matching a subscriber that unregisters itself.
//!
//! The subscription may be moved onto the delivery side; a [`FeedHandle`] kept by the
//! owner can still stop it from there.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use orientation::{OrientationSnapshot, SharedOrientation};
use serde_json::Value;

use crate::error::Result;
use crate::field_path::extract_quaternion;
use crate::refresh::{GateDecision, RefreshGate};

/// What happened to one delivered message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedOutcome {
    /// The value was applied; the snapshot is the state right after.
    Applied(OrientationSnapshot),
    /// Dropped by the refresh gate.
    RateLimited,
    /// The message timestamp went backwards; the gate was reset and the value dropped.
    ClockReset,
    /// The subscription was stopped earlier; nothing was done.
    Inactive,
}

/// Remote stop switch for a [`FeedSubscription`].
#[derive(Debug, Clone)]
pub struct FeedHandle {
    topic_name: String,
    active: Arc<AtomicBool>,
}

impl FeedHandle {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Stops the subscription; messages delivered afterwards are ignored.
    pub fn stop(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            log::info!("unsubscribing from {}", self.topic_name);
        }
    }
}

#[derive(Debug)]
pub struct FeedSubscription {
    content_path: String,
    gate: RefreshGate,
    state: SharedOrientation,
    handle: FeedHandle,
}

impl FeedSubscription {
    pub fn new(
        topic_name: impl Into<String>,
        content_path: impl Into<String>,
        period: Duration,
        state: SharedOrientation,
    ) -> Self {
        Self {
            content_path: content_path.into(),
            gate: RefreshGate::new(period),
            state,
            handle: FeedHandle {
                topic_name: topic_name.into(),
                active: Arc::new(AtomicBool::new(true)),
            },
        }
    }

    pub fn topic_name(&self) -> &str {
        &self.handle.topic_name
    }

    pub fn content_path(&self) -> &str {
        &self.content_path
    }

    pub fn period(&self) -> Duration {
        self.gate.period()
    }

    /// Changes the refresh period without dropping the gate's history.
    pub fn set_period(&mut self, period: Duration) {
        self.gate.set_period(period);
    }

    /// A stop switch that stays usable after the subscription is moved elsewhere.
    pub fn handle(&self) -> FeedHandle {
        self.handle.clone()
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_active()
    }

    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Feeds one received message, stamped with the receive time `now`.
    ///
    /// Extraction failures stop the subscription and are returned; the orientation
    /// state is left untouched.
    pub fn on_message(&mut self, now: Duration, msg: &Value) -> Result<FeedOutcome> {
        if !self.is_active() {
            return Ok(FeedOutcome::Inactive);
        }

        match self.gate.check(now) {
            GateDecision::Accept => {}
            GateDecision::TooSoon => return Ok(FeedOutcome::RateLimited),
            GateDecision::ClockReset => {
                log::debug!("{}: timestamp went backwards, resetting", self.topic_name());
                return Ok(FeedOutcome::ClockReset);
            }
        }

        match extract_quaternion(msg, &self.content_path) {
            Ok(q) => Ok(FeedOutcome::Applied(self.state.set_from_external_feed(q))),
            Err(err) => {
                log::warn!("{}: {err}", self.topic_name());
                self.stop();
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InspectorError;
    use approx::assert_abs_diff_eq;
    use orientation::{Quaternion, UpdateSource};
    use serde_json::json;
    use std::thread;

    const PERIOD: Duration = Duration::from_millis(200);

    fn imu(z: f64, w: f64) -> Value {
        json!({
            "header": { "frame_id": "imu_link" },
            "orientation": { "x": 0.0, "y": 0.0, "z": z, "w": w },
            "angular_velocity": { "x": 0.0, "y": 0.0, "z": 0.0 }
        })
    }

    #[test]
    fn applies_normalized_values_at_the_refresh_rate() {
        let state = SharedOrientation::default();
        let mut feed = FeedSubscription::new("/imu/data", "orientation", PERIOD, state.clone());

        let t0 = Duration::from_secs(1);
        let outcome = feed.on_message(t0, &imu(2.0, 2.0)).unwrap();
        let FeedOutcome::Applied(snap) = outcome else {
            panic!("expected an applied value, got {outcome:?}");
        };
        assert_eq!(snap.source, UpdateSource::ExternalFeed);
        assert_abs_diff_eq!(snap.quaternion.norm(), 1.0, epsilon = 1.0e-12);
        assert_abs_diff_eq!(snap.euler_degrees.yaw, 90.0, epsilon = 1.0e-9);

        assert_eq!(
            feed.on_message(t0 + Duration::from_millis(50), &imu(0.0, 1.0)).unwrap(),
            FeedOutcome::RateLimited
        );
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn zero_quaternion_resets_state_to_identity() {
        let state = SharedOrientation::default();
        let mut feed = FeedSubscription::new("/imu/data", "orientation", PERIOD, state.clone());
        feed.on_message(Duration::from_secs(1), &imu(0.0, 0.0)).unwrap();
        assert_eq!(state.snapshot().quaternion, Quaternion::IDENTITY);
        assert!(feed.is_active());
    }

    #[test]
    fn huge_components_are_normalized() {
        let state = SharedOrientation::default();
        let mut feed = FeedSubscription::new("/imu/data", "orientation", PERIOD, state.clone());
        let outcome = feed.on_message(Duration::from_secs(1), &imu(1.0e200, 1.0e200)).unwrap();
        let FeedOutcome::Applied(snap) = outcome else {
            panic!("expected an applied value, got {outcome:?}");
        };
        assert_abs_diff_eq!(snap.quaternion.norm(), 1.0, epsilon = 1.0e-12);
        assert_abs_diff_eq!(snap.euler_degrees.yaw, 90.0, epsilon = 1.0e-9);
    }

    #[test]
    fn bad_field_stops_the_subscription_and_keeps_state() {
        let state = SharedOrientation::default();
        state.set_from_quaternion(Quaternion::new(0.0, 0.0, 1.0, 0.0));
        let before = state.snapshot();

        let mut feed =
            FeedSubscription::new("/imu/data", "angular_velocity", PERIOD, state.clone());
        let err = feed
            .on_message(Duration::from_secs(1), &imu(0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, InspectorError::UnsupportedFieldType { .. }));
        assert!(!feed.is_active());
        assert_eq!(state.snapshot(), before);

        assert_eq!(
            feed.on_message(Duration::from_secs(5), &imu(0.0, 1.0)).unwrap(),
            FeedOutcome::Inactive
        );
    }

    #[test]
    fn clock_reset_drops_one_value() {
        let state = SharedOrientation::default();
        let mut feed = FeedSubscription::new("/imu/data", "orientation", PERIOD, state.clone());
        feed.on_message(Duration::from_secs(10), &imu(0.0, 1.0)).unwrap();

        assert_eq!(
            feed.on_message(Duration::from_secs(1), &imu(1.0, 0.0)).unwrap(),
            FeedOutcome::ClockReset
        );
        assert!(matches!(
            feed.on_message(Duration::from_secs(1), &imu(1.0, 0.0)).unwrap(),
            FeedOutcome::Applied(_)
        ));
    }

    #[test]
    fn handle_stops_a_subscription_moved_elsewhere() {
        let state = SharedOrientation::default();
        let mut feed = FeedSubscription::new("/imu/data", "orientation", PERIOD, state.clone());
        let handle = feed.handle();
        assert!(handle.is_active());

        handle.stop();
        assert!(!feed.is_active());
        assert_eq!(
            feed.on_message(Duration::from_secs(1), &imu(1.0, 0.0)).unwrap(),
            FeedOutcome::Inactive
        );
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn period_can_change_on_a_live_subscription() {
        let state = SharedOrientation::default();
        let mut feed = FeedSubscription::new("/imu/data", "orientation", PERIOD, state.clone());
        assert_eq!(feed.topic_name(), "/imu/data");
        assert_eq!(feed.content_path(), "orientation");

        let t0 = Duration::from_secs(1);
        feed.on_message(t0, &imu(0.0, 1.0)).unwrap();
        assert_eq!(
            feed.on_message(t0 + Duration::from_millis(100), &imu(0.0, 1.0)).unwrap(),
            FeedOutcome::RateLimited
        );

        feed.set_period(Duration::from_millis(50));
        assert_eq!(feed.period(), Duration::from_millis(50));
        assert!(matches!(
            feed.on_message(t0 + Duration::from_millis(100), &imu(0.0, 1.0)).unwrap(),
            FeedOutcome::Applied(_)
        ));
    }

    #[test]
    fn can_be_driven_from_a_delivery_thread() {
        let state = SharedOrientation::default();
        let mut feed = FeedSubscription::new("/imu/data", "orientation", PERIOD, state.clone());

        thread::spawn(move || {
            for n in 1..=10u64 {
                feed.on_message(Duration::from_secs(n), &imu(0.0, 1.0)).unwrap();
            }
        })
        .join()
        .unwrap();

        assert_eq!(state.revision(), 10);
    }
}
