//! Large discrepancies are applied verbatim instead of smoothed over.

use cohort_shared::{
    orientation_from_euler_degrees, BufferConfig, EntityStateBuffer, IngestOutcome, Pose, Quat,
    RenderMode, Snapshot, Vec3,
};

fn snapshot(timestamp_ms: u64, position: Vec3, orientation: Quat) -> Snapshot {
    Snapshot::new(Pose::new(position, orientation, timestamp_ms), Vec3::ZERO, timestamp_ms)
}

#[test]
fn teleport_rendered_exactly_on_next_tick() {
    let mut buffer = EntityStateBuffer::new(BufferConfig::default());
    for i in 0..5u64 {
        buffer.ingest(snapshot(i * 50, Vec3::new(i as f32 * 0.1, 0.0, 0.0), Quat::IDENTITY));
        buffer.compute_render_pose(i * 50 + 10);
    }

    let respawn = snapshot(
        300,
        Vec3::new(40.0, 2.0, -7.0),
        orientation_from_euler_degrees(Vec3::new(0.0, 45.0, 0.0)),
    );
    assert_eq!(buffer.ingest(respawn), IngestOutcome::SnapQueued);
    assert_eq!(buffer.len(), 1);

    let render = buffer.compute_render_pose(310).unwrap();
    assert_eq!(render.mode, RenderMode::Snapped);
    assert_eq!(render.pose, respawn.pose());
}

#[test]
fn small_moves_are_not_snapped() {
    let mut buffer = EntityStateBuffer::new(BufferConfig::default());
    buffer.ingest(snapshot(0, Vec3::ZERO, Quat::IDENTITY));
    assert_eq!(
        buffer.ingest(snapshot(50, Vec3::new(4.9, 0.0, 0.0), Quat::IDENTITY)),
        IngestOutcome::Buffered
    );
    assert!(!buffer.has_pending_snap());
}

#[test]
fn later_snap_replaces_pending_one() {
    let mut buffer = EntityStateBuffer::new(BufferConfig::default());
    buffer.ingest(snapshot(0, Vec3::ZERO, Quat::IDENTITY));
    buffer.ingest(snapshot(50, Vec3::new(20.0, 0.0, 0.0), Quat::IDENTITY));
    let second = snapshot(100, Vec3::new(-30.0, 0.0, 0.0), Quat::IDENTITY);
    assert_eq!(buffer.ingest(second), IngestOutcome::SnapQueued);

    let render = buffer.compute_render_pose(120).unwrap();
    assert_eq!(render.pose, second.pose());
}

#[test]
fn distance_measured_from_rendered_position() {
    let mut buffer = EntityStateBuffer::new(BufferConfig {
        snap_distance: 10.0,
        ..BufferConfig::unsmoothed()
    });

    // 60 units/s, rendered 100ms behind the newest snapshot
    for i in 0..=10u64 {
        let outcome = buffer.ingest(snapshot(
            i * 50,
            Vec3::new(i as f32 * 3.0, 0.0, 0.0),
            Quat::IDENTITY,
        ));
        assert_eq!(outcome, IngestOutcome::Buffered);
        buffer.compute_render_pose(i * 50);
    }
    let rendered = buffer.render_pose().unwrap().position;
    assert!((rendered.x - 24.0).abs() < 1e-4);

    // 5 units from the newest snapshot, 11 from what is on screen
    let jump = snapshot(550, Vec3::new(35.0, 0.0, 0.0), Quat::IDENTITY);
    assert_eq!(buffer.ingest(jump), IngestOutcome::SnapQueued);

    let render = buffer.compute_render_pose(560).unwrap();
    assert_eq!(render.mode, RenderMode::Snapped);
    assert_eq!(render.pose, jump.pose());
}
