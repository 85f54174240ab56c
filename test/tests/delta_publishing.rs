//! The local participant only costs bandwidth when something changed.

use cohort_client::{LocalSample, LocalStatePublisher, PublisherConfig, SyncConfig};
use cohort_shared::{orientation_from_euler_degrees, NetworkId, Quat, Vec3};
use cohort_test::{start_with, test_config, MockTransport};

fn still() -> LocalSample {
    LocalSample::new(Vec3::new(1.0, 0.0, 2.0), Quat::IDENTITY, Vec3::ZERO)
}

#[test]
fn stationary_publishes_exactly_once() {
    let (mut session, transport) = start_with(test_config());
    let sample = still();

    for tick in 0..100u64 {
        session.tick(tick * 50, Some(&sample)).unwrap();
    }

    let updates = transport.emitted_named("pose-update");
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0]["id"], "local");
    assert_eq!(updates[0]["position"]["z"], 2.0);
}

#[test]
fn moving_publishes_every_interval() {
    let (mut session, transport) = start_with(test_config());

    for tick in 0..20u64 {
        let x = tick as f32 * 0.25;
        let sample = LocalSample::new(Vec3::new(x, 0.0, 0.0), Quat::IDENTITY, Vec3::new(5.0, 0.0, 0.0));
        // two session ticks per publish interval
        session.tick(tick * 25, Some(&sample)).unwrap();
    }

    let updates = transport.emitted_named("pose-update");
    assert_eq!(updates.len(), 10);
    let timestamps: Vec<u64> = updates
        .iter()
        .map(|update| update["timestampMs"].as_u64().unwrap())
        .collect();
    assert!(timestamps.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(updates.iter().all(|update| update["velocity"]["x"] == 5.0));
}

#[test]
fn small_turns_are_suppressed() {
    let mut publisher = LocalStatePublisher::new(PublisherConfig::default());
    publisher.set_local_id(NetworkId::new("local"));
    let mut transport = MockTransport::new();

    let turned = |degrees: f32| {
        LocalSample::new(
            Vec3::ZERO,
            orientation_from_euler_degrees(Vec3::new(0.0, degrees, 0.0)),
            Vec3::ZERO,
        )
    };

    publisher.tick(0, &turned(0.0), &mut transport).unwrap();
    assert!(publisher.tick(50, &turned(0.5), &mut transport).unwrap().is_empty());
    assert!(publisher
        .tick(100, &turned(2.0), &mut transport)
        .unwrap()
        .pose_timestamp_ms
        .is_some());
    assert_eq!(transport.emitted_named("pose-update").len(), 2);
}

#[test]
fn animation_changes_only() {
    let (mut session, transport) = start_with(test_config());

    let states = ["idle", "idle", "run", "run", "run", "idle"];
    for (tick, state) in states.iter().enumerate() {
        let sample = still().with_animation(*state);
        session.tick(tick as u64 * 50, Some(&sample)).unwrap();
    }

    let sent: Vec<String> = transport
        .emitted_named("animation-changed")
        .iter()
        .map(|payload| payload["state"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(sent, vec!["idle", "run", "idle"]);
}

#[test]
fn nothing_published_without_local_id() {
    let config = SyncConfig {
        local_id: None,
        ..test_config()
    };
    let (mut session, transport) = start_with(config);
    let moving = LocalSample::new(Vec3::ZERO, Quat::IDENTITY, Vec3::X);
    for tick in 0..10u64 {
        session.tick(tick * 50, Some(&moving)).unwrap();
    }
    assert!(transport.emitted_named("pose-update").is_empty());
}
