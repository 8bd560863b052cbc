use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use approx::assert_abs_diff_eq;
use inspector::{FeedOutcome, Inspector, InspectorError, InspectorSettings};
use orientation::{AngleUnit, EulerAngles, OrientationState, Quaternion, UpdateSource};
use serde_json::json;

#[test]
fn identity_shows_zero_angles() {
    let state = OrientationState::new();
    let snap = state.snapshot();
    assert_eq!(snap.quaternion, Quaternion::IDENTITY);
    assert_eq!(snap.readout().yaw, "0.00000");
    assert_eq!(snap.readout().yaw_deg, "0.00000");
}

#[test]
fn quarter_turn_quaternion_reads_ninety_degrees_yaw() {
    let mut state = OrientationState::new();
    let snap = state.set_from_quaternion(Quaternion::new(
        0.0,
        0.0,
        FRAC_PI_4.sin(),
        FRAC_PI_4.cos(),
    ));
    assert_abs_diff_eq!(snap.euler_radians.yaw, FRAC_PI_2, epsilon = 1.0e-9);
    assert_abs_diff_eq!(snap.euler_degrees.yaw, 90.0, epsilon = 1.0e-9);
    assert_abs_diff_eq!(snap.euler_degrees.pitch, 0.0, epsilon = 1.0e-9);
    assert_abs_diff_eq!(snap.euler_degrees.roll, 0.0, epsilon = 1.0e-9);
}

#[test]
fn half_turn_degrees_entry_converts_back_to_positive_half_turn() {
    let mut state = OrientationState::new();
    state.set_from_euler(180.0, 0.0, 0.0, AngleUnit::Degrees);

    let q = state.current_quaternion();
    let mut replay = OrientationState::new();
    let snap = replay.set_from_quaternion(q);
    assert_abs_diff_eq!(snap.euler_degrees.yaw, 180.0, epsilon = 1.0e-6);
    assert_eq!(state.current_euler_degrees(), EulerAngles::new(180.0, 0.0, 0.0));
}

#[test]
fn live_session_end_to_end() {
    let settings: InspectorSettings = serde_json::from_value(json!({
        "topic_name": "/imu/data",
        "topic_type": "sensor_msgs/Imu",
        "topic_content": "orientation",
        "refresh_rate": 10.0,
        "manual_mode": false
    }))
    .unwrap();

    let mut session = Inspector::new(settings).unwrap();
    let revisions = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&revisions);
    session.state().subscribe(move |snap| {
        assert_eq!(snap.source, UpdateSource::ExternalFeed);
        sink.lock().unwrap().push(snap.revision);
    });

    let mut feed = session.take_feed().unwrap();
    let delivery = thread::spawn(move || {
        let mut applied = 0usize;
        for n in 0..20u64 {
            let msg = json!({
                "header": { "frame_id": "imu_link" },
                "orientation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 0.0 }
            });
            // 50 ms apart at 10 Hz; the gap has to exceed the period, so one in three
            // messages gets through.
            let now = Duration::from_millis(1_000 + n * 50);
            if let FeedOutcome::Applied(_) = feed.on_message(now, &msg).unwrap() {
                applied += 1;
            }
        }

        let bad = json!({ "orientation": "upright" });
        let err = feed
            .on_message(Duration::from_secs(60), &bad)
            .unwrap_err();
        assert!(matches!(err, InspectorError::UnsupportedFieldType { .. }));
        assert!(!feed.is_active());
        applied
    });

    let applied = delivery.join().unwrap();
    assert_eq!(applied, 7);
    assert_eq!(revisions.lock().unwrap().len(), applied);

    // Zero quaternions from the feed read as identity.
    let r = session.readout();
    assert_eq!(r.q_w, "1.00000");
    assert_eq!(r.yaw_deg, "0.00000");
}
