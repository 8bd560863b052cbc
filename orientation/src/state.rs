//! The single live orientation value and its derived views.
//!
//! # Model
//! - One [`Quaternion`] is stored. Euler radians and degrees are derived from it on
//!   every query, so the three representations cannot drift apart.
//! - The Euler convention used for the views depends on where the value came from:
//!   manual entry uses [`RotationOrders::quaternion_entry`], feed values use
//!   [`RotationOrders::feed_display`].
//! - The one exception to "derived, never stored" is a degrees entry: the typed
//!   degrees are echoed back verbatim until the next value update.
//!
//! Every mutation bumps the revision and then notifies observers with a snapshot
//! taken after the change.

use std::fmt;

use crate::convert::{euler_to_quaternion, normalize, quaternion_to_euler};
use crate::euler::{AngleUnit, EulerAngles, RotationOrder, RotationOrders};
use crate::frame::FrameSegments;
use crate::quaternion::Quaternion;
use crate::readout::Readout;

/// What produced the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateSource {
    /// Nothing has been applied yet; the value is identity.
    #[default]
    Initial,
    /// Manual quaternion entry.
    Quaternion,
    /// Manual Euler entry, in the given units.
    Euler(AngleUnit),
    /// A value delivered by the live feed.
    ExternalFeed,
}

/// Every view of the state at one revision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationSnapshot {
    pub quaternion: Quaternion,
    pub euler_radians: EulerAngles,
    pub euler_degrees: EulerAngles,
    pub frame: FrameSegments,
    pub source: UpdateSource,
    pub revision: u64,
}

impl OrientationSnapshot {
    pub fn readout(&self) -> Readout {
        Readout::new(self.quaternion, self.euler_radians, self.euler_degrees)
    }
}

/// Handle returned by [`OrientationState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// `Sync` as well as `Send`: the state lives behind an `RwLock`, which is only
/// shareable across threads when its contents are.
pub type Observer = Box<dyn FnMut(&OrientationSnapshot) + Send + Sync>;

pub struct OrientationState {
    quaternion: Quaternion,
    entered_degrees: Option<EulerAngles>,
    source: UpdateSource,
    revision: u64,
    orders: RotationOrders,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl OrientationState {
    /// Identity orientation with the default conventions.
    pub fn new() -> Self {
        Self::with_orders(RotationOrders::default())
    }

    pub fn with_orders(orders: RotationOrders) -> Self {
        Self {
            quaternion: Quaternion::IDENTITY,
            entered_degrees: None,
            source: UpdateSource::Initial,
            revision: 0,
            orders,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Stores `q` as given (no normalization) and derives the Euler views with the
    /// quaternion-entry convention.
    pub fn set_from_quaternion(&mut self, q: Quaternion) -> OrientationSnapshot {
        self.commit(q, None, UpdateSource::Quaternion)
    }

    /// Builds the quaternion from an Euler triple with the Euler-entry convention.
    ///
    /// The Euler views are then re-derived from that quaternion, except that a
    /// degrees entry keeps the typed degrees as its degrees view.
    pub fn set_from_euler(
        &mut self,
        yaw: f64,
        pitch: f64,
        roll: f64,
        unit: AngleUnit,
    ) -> OrientationSnapshot {
        let entered = EulerAngles::new(yaw, pitch, roll);
        let rad = entered.into_radians(unit);
        let q = euler_to_quaternion(rad.yaw, rad.pitch, rad.roll, self.orders.euler_entry);

        let verbatim = (unit == AngleUnit::Degrees).then_some(entered);
        self.commit(q, verbatim, UpdateSource::Euler(unit))
    }

    /// Normalizes and stores a feed value; the Euler views use the feed-display
    /// convention. A zero quaternion resets the state to identity.
    pub fn set_from_external_feed(&mut self, q: Quaternion) -> OrientationSnapshot {
        if q.max_abs() == 0.0 {
            log::debug!("zero-norm feed quaternion, resetting to identity");
        }
        self.commit(normalize(q), None, UpdateSource::ExternalFeed)
    }

    /// Swaps the conventions; the views of the current value are re-derived.
    pub fn set_orders(&mut self, orders: RotationOrders) -> OrientationSnapshot {
        self.orders = orders;
        self.commit(self.quaternion, self.entered_degrees, self.source)
    }

    pub fn orders(&self) -> RotationOrders {
        self.orders
    }

    pub fn current_quaternion(&self) -> Quaternion {
        self.quaternion
    }

    pub fn current_euler_radians(&self) -> EulerAngles {
        quaternion_to_euler(self.quaternion, self.view_order())
    }

    pub fn current_euler_degrees(&self) -> EulerAngles {
        self.entered_degrees
            .unwrap_or_else(|| self.current_euler_radians().to_degrees())
    }

    pub fn frame_segments(&self) -> FrameSegments {
        FrameSegments::from_quaternion(self.quaternion)
    }

    pub fn source(&self) -> UpdateSource {
        self.source
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> OrientationSnapshot {
        let euler_radians = self.current_euler_radians();
        OrientationSnapshot {
            quaternion: self.quaternion,
            euler_radians,
            euler_degrees: self
                .entered_degrees
                .unwrap_or_else(|| euler_radians.to_degrees()),
            frame: self.frame_segments(),
            source: self.source,
            revision: self.revision,
        }
    }

    /// The current value scaled to unit norm (identity if degenerate).
    pub fn normalized_quaternion(&self) -> Quaternion {
        normalize(self.quaternion)
    }

    /// Display fields for the normalized value, with Euler views in the feed-display
    /// convention. This is what the entry panel shows once an edit is committed and
    /// whenever the live feed drives the state.
    pub fn normalized_readout(&self) -> Readout {
        let q = self.normalized_quaternion();
        let e = quaternion_to_euler(q, self.orders.feed_display);
        Readout::new(q, e, e.to_degrees())
    }

    /// Registers an observer that receives a snapshot after every mutation.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&OrientationSnapshot) + Send + Sync + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    fn view_order(&self) -> RotationOrder {
        match self.source {
            UpdateSource::ExternalFeed => self.orders.feed_display,
            UpdateSource::Initial | UpdateSource::Quaternion | UpdateSource::Euler(_) => {
                self.orders.quaternion_entry
            }
        }
    }

    fn commit(
        &mut self,
        q: Quaternion,
        entered_degrees: Option<EulerAngles>,
        source: UpdateSource,
    ) -> OrientationSnapshot {
        self.quaternion = q;
        self.entered_degrees = entered_degrees;
        self.source = source;
        self.revision += 1;

        let snapshot = self.snapshot();
        for (_, observer) in &mut self.observers {
            observer(&snapshot);
        }
        snapshot
    }
}

impl Default for OrientationState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OrientationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrientationState")
            .field("quaternion", &self.quaternion)
            .field("entered_degrees", &self.entered_degrees)
            .field("source", &self.source)
            .field("revision", &self.revision)
            .field("orders", &self.orders)
            .field("observers", &self.observers.len())
            .finish()
    }
}
