//! The snapshot history stays sorted and bounded for any arrival order.

use cohort_shared::{BufferConfig, EntityStateBuffer, Pose, Snapshot, Vec3};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_sorted_and_bounded(
        capacity in 1usize..16,
        arrivals in prop::collection::vec((0u64..10_000, 0.0f32..4.0), 1..200),
    ) {
        let mut buffer = EntityStateBuffer::new(BufferConfig {
            capacity,
            retention_ms: 1_000_000,
            ..BufferConfig::default()
        });

        for (timestamp_ms, x) in arrivals {
            let pose = Pose::at_position(Vec3::new(x, 0.0, 0.0), timestamp_ms);
            buffer.ingest(Snapshot::new(pose, Vec3::ZERO, timestamp_ms));

            prop_assert!(buffer.len() <= capacity);
            let timestamps: Vec<u64> = buffer.snapshots().map(|s| s.timestamp_ms()).collect();
            prop_assert!(timestamps.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    /// Pruning on render never drops the newest snapshot
    #[test]
    fn prop_render_keeps_newest(
        timestamps in prop::collection::btree_set(0u64..5_000, 1..50),
        now in 0u64..20_000,
    ) {
        let mut buffer = EntityStateBuffer::new(BufferConfig::default());
        let newest = *timestamps.iter().next_back().unwrap();
        for timestamp_ms in timestamps {
            let pose = Pose::at_position(Vec3::ZERO, timestamp_ms);
            buffer.ingest(Snapshot::new(pose, Vec3::ZERO, timestamp_ms));
        }
        buffer.compute_render_pose(now);
        prop_assert_eq!(buffer.newest().map(|s| s.timestamp_ms()), Some(newest));
    }
}
