use crate::math::{Quat, Vec3};

/// A position plus an orientation, stamped with the sender's monotonic time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
    pub timestamp_ms: u64,
}

impl Pose {
    pub fn new(position: Vec3, orientation: Quat, timestamp_ms: u64) -> Self {
        Self {
            position,
            orientation,
            timestamp_ms,
        }
    }

    pub fn at_position(position: Vec3, timestamp_ms: u64) -> Self {
        Self::new(position, Quat::IDENTITY, timestamp_ms)
    }
}

/// One timestamped pose and velocity sample for a remote entity.
///
/// Snapshots are immutable once created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pose: Pose,
    velocity: Vec3,
    arrival_ms: u64,
}

impl Snapshot {
    pub fn new(pose: Pose, velocity: Vec3, arrival_ms: u64) -> Self {
        Self {
            pose,
            velocity,
            arrival_ms,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    pub fn orientation(&self) -> Quat {
        self.pose.orientation
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.pose.timestamp_ms
    }

    /// Units per second
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn arrival_ms(&self) -> u64 {
        self.arrival_ms
    }

    /// Dead-reckoned position `elapsed_ms` after this snapshot was taken
    pub fn extrapolate(&self, elapsed_ms: u64) -> Vec3 {
        self.pose.position + self.velocity * (elapsed_ms as f32 / 1000.0)
    }
}
