//! Thread-safe handle over [`OrientationState`].
//!
//! A feed may deliver values on its own thread while the UI thread reads. Every setter
//! holds the write lock for the entire transition (store, revision bump, observer
//! notification) and every read of several views goes through [`SharedOrientation::snapshot`],
//! so a reader never sees a quaternion paired with a stale Euler view.
//!
//! Observers run while the write lock is held and must not call back into the handle.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::euler::{AngleUnit, RotationOrders};
use crate::quaternion::Quaternion;
use crate::readout::Readout;
use crate::state::{ObserverId, OrientationSnapshot, OrientationState};

#[derive(Debug, Clone, Default)]
pub struct SharedOrientation {
    inner: Arc<RwLock<OrientationState>>,
}

impl SharedOrientation {
    pub fn new(state: OrientationState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    pub fn with_orders(orders: RotationOrders) -> Self {
        Self::new(OrientationState::with_orders(orders))
    }

    // A panic inside an observer poisons the lock, but the state itself is only ever
    // written between complete transitions, so the guard is still usable.
    fn read(&self) -> RwLockReadGuard<'_, OrientationState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, OrientationState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_from_quaternion(&self, q: Quaternion) -> OrientationSnapshot {
        self.write().set_from_quaternion(q)
    }

    pub fn set_from_euler(
        &self,
        yaw: f64,
        pitch: f64,
        roll: f64,
        unit: AngleUnit,
    ) -> OrientationSnapshot {
        self.write().set_from_euler(yaw, pitch, roll, unit)
    }

    pub fn set_from_external_feed(&self, q: Quaternion) -> OrientationSnapshot {
        self.write().set_from_external_feed(q)
    }

    pub fn set_orders(&self, orders: RotationOrders) -> OrientationSnapshot {
        self.write().set_orders(orders)
    }

    pub fn snapshot(&self) -> OrientationSnapshot {
        self.read().snapshot()
    }

    pub fn normalized_readout(&self) -> Readout {
        self.read().normalized_readout()
    }

    pub fn revision(&self) -> u64 {
        self.read().revision()
    }

    pub fn subscribe(
        &self,
        observer: impl FnMut(&OrientationSnapshot) + Send + Sync + 'static,
    ) -> ObserverId {
        self.write().subscribe(observer)
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.write().unsubscribe(id)
    }

    /// Runs `f` against the state under one read lock.
    pub fn with_state<R>(&self, f: impl FnOnce(&OrientationState) -> R) -> R {
        f(&self.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{euler_to_quaternion, quaternion_to_euler};
    use crate::euler::RotationOrder;
    use approx::assert_abs_diff_eq;
    use std::thread;

    #[test]
    fn clones_share_one_state() {
        let a = SharedOrientation::default();
        let b = a.clone();
        a.set_from_quaternion(Quaternion::new(0.0, 0.0, 1.0, 0.0));
        assert_eq!(b.snapshot().quaternion, Quaternion::new(0.0, 0.0, 1.0, 0.0));
        assert_eq!(b.revision(), 1);
    }

    #[test]
    fn concurrent_feed_writes_are_never_torn() {
        let shared = SharedOrientation::default();
        let writer = shared.clone();

        let handle = thread::spawn(move || {
            for n in 0..500 {
                let yaw = (n as f64 * 0.01).sin();
                let q = euler_to_quaternion(yaw, 0.2, -0.1, RotationOrder::SZYX);
                writer.set_from_external_feed(q);
            }
        });

        for _ in 0..500 {
            let snap = shared.snapshot();
            let expected = quaternion_to_euler(snap.quaternion, RotationOrder::SZYX);
            if snap.revision > 0 {
                assert_abs_diff_eq!(snap.euler_radians.yaw, expected.yaw, epsilon = 1.0e-12);
                assert_abs_diff_eq!(snap.euler_radians.pitch, expected.pitch, epsilon = 1.0e-12);
                assert_abs_diff_eq!(
                    snap.euler_degrees.yaw,
                    expected.yaw.to_degrees(),
                    epsilon = 1.0e-9
                );
            }
        }

        handle.join().unwrap();
        assert_eq!(shared.revision(), 500);
    }

    #[test]
    fn observers_run_inside_the_transition() {
        let shared = SharedOrientation::default();
        let (tx, rx) = std::sync::mpsc::channel();
        shared.subscribe(move |snap| {
            tx.send(snap.revision).ok();
        });

        let writer = shared.clone();
        thread::spawn(move || {
            writer.set_from_external_feed(Quaternion::IDENTITY);
        })
        .join()
        .unwrap();

        assert_eq!(rx.recv().unwrap(), 1);
    }
}
