//! Per-entity messages reach the right entity, or nobody.

use std::sync::{Arc, Mutex};

use cohort_client::{AnimationEvent, DespawnEvent, ErrorEvent, GameplayEvent, SyncError};
use cohort_shared::{EventName, GameplayNotice, MessageError, NetworkId, NoticeCategory, Vec3};
use cohort_test::{deliver_pose, payloads, started_session};

#[test]
fn remote_movement_is_interpolated() {
    let (mut session, transport, _) = started_session(&["a"], 0);

    deliver_pose(&transport, "a", 0.0, 1_000);
    session.tick(1_000, None).unwrap();
    deliver_pose(&transport, "a", 10.0, 1_200);
    session.tick(1_200, None).unwrap();

    let a = session.registry().get(&NetworkId::new("a")).unwrap();
    let position = a.render_pose().unwrap().position;
    assert!((position - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
    assert!(!a.is_extrapolating());
}

#[test]
fn animation_events_only_on_change() {
    let (mut session, transport, _) = started_session(&["a"], 0);
    transport.deliver("animation-changed", payloads::animation_changed("a", "run"));
    transport.deliver("animation-changed", payloads::animation_changed("a", "run"));
    transport.deliver("animation-changed", payloads::animation_changed("ghost", "run"));
    let mut events = session.tick(50, None).unwrap();

    let changes: Vec<(NetworkId, String)> = events.read::<AnimationEvent>().collect();
    assert_eq!(changes, vec![(NetworkId::new("a"), "run".to_string())]);
    let a = session.registry().get(&NetworkId::new("a")).unwrap();
    assert_eq!(a.animation(), Some("run"));
}

#[test]
fn notices_go_to_handlers_by_category() {
    let (mut session, transport, _) = started_session(&["a"], 0);
    let seen: Arc<Mutex<Vec<EventName>>> = Arc::new(Mutex::new(Vec::new()));

    let vitals = seen.clone();
    session
        .handlers_mut()
        .register_category(NoticeCategory::Vitals, move |notice: &GameplayNotice| {
            vitals.lock().unwrap().push(notice.event);
        });

    transport.deliver("health-changed", payloads::notice("a"));
    transport.deliver("died", payloads::notice("a"));
    transport.deliver("skill-used", payloads::notice("a"));
    transport.deliver("attack-performed", payloads::notice("nobody"));
    let mut events = session.tick(50, None).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![EventName::HealthChanged, EventName::Died]
    );
    let unhandled: Vec<GameplayNotice> = events.read::<GameplayEvent>().collect();
    assert_eq!(unhandled.len(), 1);
    assert_eq!(unhandled[0].event, EventName::SkillUsed);
    assert_eq!(unhandled[0].payload["amount"], 5);
}

#[test]
fn member_left_despawns_and_ignores_later_traffic() {
    let (mut session, transport, _) = started_session(&["a", "b"], 0);
    transport.deliver("member-left", payloads::member_left("a"));
    transport.deliver("member-left", payloads::member_left("a"));
    deliver_pose(&transport, "a", 1.0, 100);
    let mut events = session.tick(100, None).unwrap();

    assert_eq!(
        events.read::<DespawnEvent>().collect::<Vec<_>>(),
        vec![NetworkId::new("a")]
    );
    assert!(!session.registry().is_active(&NetworkId::new("a")));
    assert!(session.registry().is_active(&NetworkId::new("b")));
}

#[test]
fn unknown_ids_are_ignored_without_errors() {
    let (mut session, transport, _) = started_session(&["a"], 0);
    deliver_pose(&transport, "ghost", 1.0, 100);
    transport.deliver("animation-changed", payloads::animation_changed("ghost", "run"));
    transport.deliver("died", payloads::notice("ghost"));
    transport.deliver("member-left", payloads::member_left("ghost"));
    let events = session.tick(100, None).unwrap();

    assert!(events.is_empty());
    assert!(!session.registry().is_active(&NetworkId::new("ghost")));
    assert_eq!(session.registry().active_len(), 1);
}

#[test]
fn out_of_range_timestamp_only_costs_that_message() {
    let (mut session, transport, _) = started_session(&["a", "b"], 0);
    deliver_pose(&transport, "a", 1.0, u64::MAX);
    deliver_pose(&transport, "b", 2.0, 100);
    let mut events = session.tick(100, None).unwrap();

    assert_eq!(
        events.read::<ErrorEvent>().collect::<Vec<_>>(),
        vec![SyncError::Message(MessageError::TimestampOutOfRange {
            event: "pose-update",
            timestamp_ms: u64::MAX,
        })]
    );
    let a = session.registry().get(&NetworkId::new("a")).unwrap();
    assert!(a.buffer().is_empty());
    let b = session.registry().get(&NetworkId::new("b")).unwrap();
    assert_eq!(b.render_pose().unwrap().position, Vec3::new(2.0, 0.0, 0.0));
}
