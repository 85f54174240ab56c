//! ## `EntityStateBuffer` – per-entity pose reconstruction
//!
//! Owns the bounded snapshot history of a *single remote entity* and turns it
//! into one render pose per tick.
//!
//! ---
//! ### 1 · Timeline
//!
//! ```text
//!   sender time ──►   s0        s1        s2        s3
//!                     |---------|---------|---------|
//!                               ▲                   ▲
//!                          render_time        newest snapshot
//!                               └── interpolation_delay_ms ──► now
//! ```
//!
//! `render_time = now - clock_offset - interpolation_delay_ms`. The clock
//! offset maps local arrival time onto the sender's timeline; it is the
//! smallest `arrival_ms - timestamp_ms` seen so far (the least delayed
//! packet).
//!
//! ---
//! ### 2 · Target selection
//! * **Bracketed** – two snapshots surround `render_time`: lerp position,
//!   slerp orientation.
//! * **Warming up** – `render_time` is before the oldest snapshot: hold it.
//! * **Starved** – all data is older than `render_time`: dead-reckon with the
//!   newest velocity for at most `max_prediction_ms`, then freeze at the pose
//!   reached at exactly that cap.
//! * **Snap** – a snapshot too far from the last known pose replaces the whole
//!   history and is rendered verbatim on the next call.
//!
//! ---
//! ### 3 · Key invariants
//! * The snapshot list is ascending by timestamp and never exceeds
//!   `capacity`.
//! * Rendered output only eases toward the target, so it never overshoots
//!   the extrapolation cap.

use log::{debug, trace};

use crate::{
    math::{angle_between_degrees, clamp01, smoothing_factor, Vec3},
    pose::{Pose, Snapshot},
    snapshot_list::{SnapshotList, SnapshotListError},
    state_buffer::BufferConfig,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Inserted as a smooth target
    Buffered,
    /// Replaced a snapshot carrying the same timestamp
    Replaced,
    /// Too far from the last known pose; rendered verbatim on the next tick
    SnapQueued,
    /// Older than the retention horizon, dropped
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Snapped,
    Interpolating,
    Extrapolating,
    Frozen,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPose {
    pub pose: Pose,
    pub mode: RenderMode,
}

pub struct EntityStateBuffer {
    config: BufferConfig,
    snapshots: SnapshotList<Snapshot>,
    pending_snap: Option<Snapshot>,
    render_pose: Option<Pose>,
    last_render_ms: Option<u64>,
    last_mode: Option<RenderMode>,
    clock_offset_ms: Option<i64>,
    frozen: bool,
}

impl EntityStateBuffer {
    pub fn new(config: BufferConfig) -> Self {
        let snapshots = SnapshotList::new(config.capacity);
        Self {
            config,
            snapshots,
            pending_snap: None,
            render_pose: None,
            last_render_ms: None,
            last_mode: None,
            clock_offset_ms: None,
            frozen: false,
        }
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn newest(&self) -> Option<&Snapshot> {
        self.snapshots.back().map(|(_, snapshot)| snapshot)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter().map(|(_, snapshot)| snapshot)
    }

    /// Last pose returned by `compute_render_pose`
    pub fn render_pose(&self) -> Option<Pose> {
        self.render_pose
    }

    pub fn has_pending_snap(&self) -> bool {
        self.pending_snap.is_some()
    }

    pub fn is_extrapolating(&self) -> bool {
        self.last_mode == Some(RenderMode::Extrapolating)
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Pins the output to the current render pose until `clear` is called.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.pending_snap = None;
        self.render_pose = None;
        self.last_render_ms = None;
        self.last_mode = None;
        self.clock_offset_ms = None;
        self.frozen = false;
    }

    /// Places the entity at `pose` without touching the snapshot history or
    /// the clock offset. Used for spawn poses that carry no sender timestamp.
    pub fn seed(&mut self, pose: Pose) {
        self.snapshots.clear();
        self.pending_snap = Some(Snapshot::new(pose, Vec3::ZERO, pose.timestamp_ms));
    }

    pub fn ingest(&mut self, snapshot: Snapshot) -> IngestOutcome {
        let timestamp_ms = snapshot.timestamp_ms();

        if let Some((newest_ms, _)) = self.snapshots.back() {
            if timestamp_ms.saturating_add(self.config.retention_ms) < *newest_ms {
                trace!(
                    "Dropping stale snapshot at {}ms, newest is {}ms",
                    timestamp_ms,
                    newest_ms
                );
                return IngestOutcome::Stale;
            }
        }

        self.observe_clock_offset(&snapshot);

        if self.exceeds_snap_threshold(&snapshot) {
            debug!("Snap correction queued for snapshot at {}ms", timestamp_ms);
            self.snapshots.clear();
            if let Err(error) = self.snapshots.try_insert_scan_from_back(timestamp_ms, snapshot) {
                debug!("{}", error);
            }
            self.pending_snap = Some(snapshot);
            return IngestOutcome::SnapQueued;
        }

        match self.snapshots.try_insert_scan_from_back(timestamp_ms, snapshot) {
            Ok(evicted) => {
                if let Some((evicted_ms, _)) = evicted {
                    trace!("Buffer full, evicted snapshot at {}ms", evicted_ms);
                }
                IngestOutcome::Buffered
            }
            Err(SnapshotListError::DuplicateTimestamp { .. }) => {
                self.snapshots.replace_scan_from_back(timestamp_ms, snapshot);
                IngestOutcome::Replaced
            }
        }
    }

    /// Computes the pose to render at local time `now_ms`, or `None` if no
    /// snapshot has ever been ingested.
    pub fn compute_render_pose(&mut self, now_ms: u64) -> Option<RenderPose> {
        if self.frozen {
            return self.render_pose.map(|pose| RenderPose {
                pose,
                mode: RenderMode::Frozen,
            });
        }

        if let Some(snap) = self.pending_snap.take() {
            let pose = snap.pose();
            self.render_pose = Some(pose);
            self.last_render_ms = Some(now_ms);
            self.last_mode = Some(RenderMode::Snapped);
            return Some(RenderPose {
                pose,
                mode: RenderMode::Snapped,
            });
        }

        let Some((target, mode)) = self.target_pose(now_ms) else {
            // seeded but nothing received yet: hold
            let pose = self.render_pose?;
            return Some(RenderPose {
                pose,
                mode: self.last_mode.unwrap_or(RenderMode::Snapped),
            });
        };

        let pose = match (self.render_pose, self.last_render_ms) {
            (Some(current), Some(last_render_ms)) => {
                self.smooth(current, target, now_ms.saturating_sub(last_render_ms))
            }
            _ => target,
        };

        self.render_pose = Some(pose);
        self.last_render_ms = Some(now_ms);
        self.last_mode = Some(mode);

        Some(RenderPose { pose, mode })
    }

    fn render_time(&self, now_ms: u64) -> i64 {
        let clock_offset_ms = self.clock_offset_ms.unwrap_or(0);
        signed_ms(now_ms)
            .saturating_sub(clock_offset_ms)
            .saturating_sub(signed_ms(self.config.interpolation_delay_ms))
    }

    fn target_pose(&mut self, now_ms: u64) -> Option<(Pose, RenderMode)> {
        let render_time = self.render_time(now_ms);
        let (first_ms, first) = self.snapshots.front().copied()?;
        let (newest_ms, newest) = self.snapshots.back().copied()?;

        if render_time <= signed_ms(first_ms) {
            return Some((first.pose(), RenderMode::Interpolating));
        }

        if render_time > signed_ms(newest_ms) {
            self.snapshots
                .remove_older_than(newest_ms.saturating_sub(self.config.retention_ms));

            let gap_ms = render_time.abs_diff(signed_ms(newest_ms));
            if gap_ms <= self.config.max_prediction_ms {
                let position = newest.extrapolate(gap_ms);
                let pose = Pose::new(position, newest.orientation(), render_time as u64);
                return Some((pose, RenderMode::Extrapolating));
            }

            let cap_ms = self.config.max_prediction_ms;
            let position = newest.extrapolate(cap_ms);
            let pose = Pose::new(
                position,
                newest.orientation(),
                newest_ms.saturating_add(cap_ms),
            );
            return Some((pose, RenderMode::Frozen));
        }

        let mut from = (first_ms, first);
        let mut to = (newest_ms, newest);
        for (timestamp_ms, snapshot) in self.snapshots.iter().skip(1) {
            if signed_ms(*timestamp_ms) >= render_time {
                to = (*timestamp_ms, *snapshot);
                break;
            }
            from = (*timestamp_ms, *snapshot);
        }

        let (from_ms, from) = from;
        let (to_ms, to) = to;
        let span_ms = to_ms.saturating_sub(from_ms);
        let t = if span_ms == 0 {
            1.0
        } else {
            clamp01(render_time.abs_diff(signed_ms(from_ms)) as f32 / span_ms as f32)
        };

        let position = from.position().lerp(to.position(), t);
        let orientation = from.orientation().slerp(to.orientation(), t);

        self.snapshots
            .remove_older_than(from_ms.saturating_sub(self.config.retention_ms));

        Some((
            Pose::new(position, orientation, render_time as u64),
            RenderMode::Interpolating,
        ))
    }

    fn smooth(&self, current: Pose, target: Pose, elapsed_ms: u64) -> Pose {
        let position = match self.config.position_smoothing_rate {
            Some(rate) => current
                .position
                .lerp(target.position, smoothing_factor(rate, elapsed_ms)),
            None => target.position,
        };
        let orientation = match self.config.rotation_smoothing_rate {
            Some(rate) => current
                .orientation
                .slerp(target.orientation, smoothing_factor(rate, elapsed_ms)),
            None => target.orientation,
        };
        Pose::new(position, orientation, target.timestamp_ms)
    }

    fn observe_clock_offset(&mut self, snapshot: &Snapshot) {
        let offset_ms =
            signed_ms(snapshot.arrival_ms()).saturating_sub(signed_ms(snapshot.timestamp_ms()));
        self.clock_offset_ms = Some(match self.clock_offset_ms {
            Some(current) => current.min(offset_ms),
            None => offset_ms,
        });
    }

    // Measured from what the viewer sees: a queued snap, else the current
    // render pose, else the newest buffered snapshot.
    fn exceeds_snap_threshold(&self, snapshot: &Snapshot) -> bool {
        let reference = match (&self.pending_snap, &self.render_pose, self.newest()) {
            (Some(snap), _, _) => snap.pose(),
            (None, Some(render_pose), _) => *render_pose,
            (None, None, Some(newest)) => newest.pose(),
            (None, None, None) => return false,
        };

        reference.position.distance(snapshot.position()) > self.config.snap_distance
            || angle_between_degrees(reference.orientation, snapshot.orientation())
                > self.config.snap_rotation_degrees
    }
}

fn signed_ms(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}
