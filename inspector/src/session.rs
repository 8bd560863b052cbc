//! One inspection session: settings, the shared orientation, and whichever input is
//! currently in charge.
//!
//! # Modes
//! - Manual: text edits drive the state; no feed subscription exists.
//! - Subscriber: a [`FeedSubscription`] drives the state; text edits are ignored and
//!   the panel shows the normalized value.

use orientation::{
    AngleUnit, OrientationSnapshot, Quaternion, Readout, SharedOrientation, parse_float,
};

use crate::error::Result;
use crate::feed::{FeedHandle, FeedSubscription};
use crate::settings::InspectorSettings;

/// Value substituted for a field that does not parse as a number.
const FIELD_DEFAULT: f64 = 0.0;

#[derive(Debug)]
pub struct Inspector {
    settings: InspectorSettings,
    state: SharedOrientation,
    feed: Option<FeedSubscription>,
    /// Stop switch for the current subscription, also after [`Inspector::take_feed`].
    feed_handle: Option<FeedHandle>,
}

impl Inspector {
    pub fn new(settings: InspectorSettings) -> Result<Self> {
        let mut inspector = Self {
            settings: InspectorSettings::default(),
            state: SharedOrientation::with_orders(settings.orders),
            feed: None,
            feed_handle: None,
        };
        inspector.apply_settings(settings)?;
        Ok(inspector)
    }

    /// Validates and adopts `settings`, switching mode as needed.
    ///
    /// On error the previous settings stay in effect.
    pub fn apply_settings(&mut self, settings: InspectorSettings) -> Result<()> {
        let period = match settings.refresh_period() {
            Ok(period) => period,
            Err(err) => {
                log::warn!("{err}; keeping previous settings");
                return Err(err);
            }
        };

        if settings.orders != self.state.with_state(|s| s.orders()) {
            self.state.set_orders(settings.orders);
        }

        if settings.manual_mode {
            log::info!("manual mode");
            self.stop_feed();
        } else {
            log::info!("subscriber mode");
            if let Some(feed) = self.feed.as_mut().filter(|feed| {
                feed.is_active()
                    && feed.topic_name() == settings.topic_name
                    && feed.content_path() == settings.topic_content
            }) {
                feed.set_period(period);
            } else {
                self.stop_feed();
                if settings.has_feed_target() {
                    let feed = FeedSubscription::new(
                        settings.topic_name.clone(),
                        settings.topic_content.clone(),
                        period,
                        self.state.clone(),
                    );
                    self.feed_handle = Some(feed.handle());
                    self.feed = Some(feed);
                } else {
                    log::warn!("subscriber mode without a topic and content path; nothing to show");
                }
            }
        }

        self.settings = settings;
        Ok(())
    }

    pub fn settings(&self) -> &InspectorSettings {
        &self.settings
    }

    pub fn is_manual(&self) -> bool {
        self.settings.manual_mode
    }

    /// Handle to the live orientation, for renderers and observers.
    pub fn state(&self) -> &SharedOrientation {
        &self.state
    }

    pub fn feed_mut(&mut self) -> Option<&mut FeedSubscription> {
        self.feed.as_mut()
    }

    /// Hands the subscription to the delivery side (e.g. a transport thread).
    pub fn take_feed(&mut self) -> Option<FeedSubscription> {
        self.feed.take()
    }

    /// The four quaternion fields were edited.
    pub fn edit_quaternion_text(
        &self,
        x: &str,
        y: &str,
        z: &str,
        w: &str,
    ) -> Option<OrientationSnapshot> {
        if !self.accepts_manual_input() {
            return None;
        }

        let q = Quaternion::new(
            parse_float(x, FIELD_DEFAULT),
            parse_float(y, FIELD_DEFAULT),
            parse_float(z, FIELD_DEFAULT),
            parse_float(w, FIELD_DEFAULT),
        );
        Some(self.state.set_from_quaternion(q))
    }

    /// The three Euler fields of one unit were edited.
    pub fn edit_euler_text(
        &self,
        yaw: &str,
        pitch: &str,
        roll: &str,
        unit: AngleUnit,
    ) -> Option<OrientationSnapshot> {
        if !self.accepts_manual_input() {
            return None;
        }

        Some(self.state.set_from_euler(
            parse_float(yaw, FIELD_DEFAULT),
            parse_float(pitch, FIELD_DEFAULT),
            parse_float(roll, FIELD_DEFAULT),
            unit,
        ))
    }

    /// An edit was confirmed; every field is rewritten with the normalized value.
    pub fn commit(&self) -> Readout {
        self.state.normalized_readout()
    }

    /// What the entry panel should currently show.
    pub fn readout(&self) -> Readout {
        if self.is_manual() {
            self.state.snapshot().readout()
        } else {
            self.state.normalized_readout()
        }
    }

    fn stop_feed(&mut self) {
        if let Some(handle) = self.feed_handle.take() {
            handle.stop();
        }
        self.feed = None;
    }

    fn accepts_manual_input(&self) -> bool {
        if !self.is_manual() {
            log::debug!("ignoring manual edit in subscriber mode");
        }
        self.is_manual()
    }
}
