//! Initialization, leaving, disconnects and message failures.

use cohort_client::{
    resolve_order, DisconnectEvent, ErrorEvent, InitError, InitStage, LocalSample, SyncConfig,
    SyncError, SyncSession,
};
use cohort_shared::{
    Backoff, EventName, MessageError, NetworkId, Quat, RenderMode, RetryPolicy, Vec3,
};
use cohort_test::{
    deliver_pose, init_logging, payloads, start_with, started_session, test_config, MockTransport,
};

#[test]
fn initialization_respects_dependencies() {
    let (session, transport) = start_with(test_config());

    let order = session.init_order();
    assert_eq!(order.len(), InitStage::ALL.len());
    let position = |stage: InitStage| order.iter().position(|s| *s == stage).unwrap();
    for stage in InitStage::ALL {
        for dependency in stage.dependencies() {
            assert!(position(*dependency) < position(stage), "{:?} before {:?}", dependency, stage);
        }
    }

    assert_eq!(transport.subscription_count(), EventName::INBOUND.len());
    assert!(!transport.is_subscribed("roster-request"));
    assert_eq!(transport.emitted_named("roster-request").len(), 1);
}

#[test]
fn cyclic_stage_graph_is_rejected() {
    let result = resolve_order(&[InitStage::Publisher, InitStage::RosterRequest], |stage| {
        match stage {
            InitStage::Publisher => vec![InitStage::RosterRequest],
            _ => vec![InitStage::Publisher],
        }
    });
    assert!(matches!(result, Err(InitError::DependencyCycle { .. })));
}

#[test]
fn tick_requires_initialize() {
    init_logging();
    let mut session = SyncSession::new(test_config(), MockTransport::new());
    assert_eq!(session.tick(0, None).err(), Some(SyncError::NotInitialized));
}

#[test]
fn leave_drops_everything_from_the_old_session() {
    let (mut session, transport, _) = started_session(&["a", "b"], 100);
    let old_sender = session.sender();

    // queued but not yet drained when leaving
    transport.deliver("member-left", payloads::member_left("a"));
    session.leave();
    assert_eq!(session.registry().active_len(), 0);
    assert!(!session.is_initialized());

    // still wired to the old handlers
    transport.deliver("member-joined", payloads::member_joined("late", 0));
    old_sender.send("member-joined", payloads::member_joined("stale", 1));

    session.initialize(1_000).unwrap();
    old_sender.send("member-joined", payloads::member_joined("stale", 1));
    transport.deliver("member-joined", payloads::member_joined("fresh", 2));
    let events = session.tick(1_050, None).unwrap();

    assert!(events.is_empty());
    assert_eq!(session.generation(), 1);
    assert_eq!(session.registry().pending_len(), 1);
    assert!(session.registry().is_pending(&NetworkId::new("fresh")));
}

#[test]
fn malformed_payload_only_loses_that_message() {
    let (mut session, transport, _) = started_session(&["a", "b"], 100);

    transport.deliver("pose-update", serde_json::json!({ "id": "a", "position": "north" }));
    deliver_pose(&transport, "b", 1.0, 120);
    transport.deliver("pose-update", serde_json::json!({ "id": "a", "timestampMs": 130 }));
    session.sender().send("teleport", payloads::member_left("b"));
    let mut events = session.tick(150, None).unwrap();

    let errors: Vec<SyncError> = events.read::<ErrorEvent>().collect();
    assert_eq!(errors.len(), 3);
    assert!(matches!(
        errors[0],
        SyncError::Message(MessageError::Malformed { event: "pose-update", .. })
    ));
    assert_eq!(
        errors[2],
        SyncError::Message(MessageError::UnknownEvent {
            name: "teleport".to_string()
        })
    );

    let a = session.registry().get(&NetworkId::new("a")).unwrap();
    assert!(a.buffer().is_empty());
    let b = session.registry().get(&NetworkId::new("b")).unwrap();
    assert_eq!(b.buffer().len(), 1);
}

#[test]
fn disconnect_freezes_entities_and_stops_publishing() {
    let (mut session, transport, _) = started_session(&["a"], 100);
    let sample = LocalSample::new(Vec3::ZERO, Quat::IDENTITY, Vec3::X);

    deliver_pose(&transport, "a", 0.0, 1_000);
    deliver_pose(&transport, "a", 1.0, 1_050);
    session.tick(1_050, Some(&sample)).unwrap();
    deliver_pose(&transport, "a", 2.0, 1_100);
    session.tick(1_100, Some(&sample)).unwrap();
    let before = session
        .registry()
        .get(&NetworkId::new("a"))
        .unwrap()
        .render_pose()
        .unwrap();

    session.sender().disconnected();
    session.sender().disconnected();
    let mut events = session.tick(1_150, Some(&sample)).unwrap();
    assert_eq!(events.read::<DisconnectEvent>().count(), 1);
    assert!(session.is_disconnected());

    transport.clear_emitted();
    deliver_pose(&transport, "a", 3.0, 1_150);
    for now in [1_200, 1_500, 3_000] {
        session.tick(now, Some(&sample)).unwrap();
        let a = session.registry().get(&NetworkId::new("a")).unwrap();
        assert!(a.is_frozen());
        assert_eq!(a.render_mode(), Some(RenderMode::Frozen));
        assert_eq!(a.render_pose().unwrap(), before);
    }
    assert!(transport.emitted_named("pose-update").is_empty());
}

#[test]
fn roster_request_gives_up_after_max_attempts() {
    let config = SyncConfig {
        roster_retry: RetryPolicy {
            max_attempts: 3,
            backoff: Backoff::Fixed { delay_ms: 100 },
            jitter: 0.0,
        },
        ..test_config()
    };
    let (mut session, transport) = start_with(config);

    session.tick(50, None).unwrap();
    session.tick(100, None).unwrap();
    session.tick(200, None).unwrap();
    let mut events = session.tick(300, None).unwrap();
    assert_eq!(
        events.read::<ErrorEvent>().collect::<Vec<_>>(),
        vec![SyncError::RosterUnavailable { attempts: 3 }]
    );
    let mut events = session.tick(400, None).unwrap();
    assert!(!events.has::<ErrorEvent>());
    assert_eq!(events.read::<ErrorEvent>().count(), 0);

    let attempts: Vec<u64> = transport
        .emitted_named("roster-request")
        .iter()
        .map(|payload| payload["attempt"].as_u64().unwrap())
        .collect();
    assert_eq!(attempts, vec![1, 2, 3]);
}

#[test]
fn roster_snapshot_stops_retries() {
    let (mut session, transport) = start_with(test_config());
    transport.deliver("roster-snapshot", payloads::roster_snapshot(vec![], "local", 0));
    for now in (0..20_000).step_by(250) {
        session.tick(now, None).unwrap();
    }
    assert_eq!(transport.emitted_named("roster-request").len(), 1);
}
