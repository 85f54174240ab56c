use log::{debug, info, trace};

use cohort_shared::{
    angle_between_degrees, orientation_to_euler_degrees, AnimationChanged, MessageError,
    NetworkId, PoseUpdate, Quat, Vec3,
};

use crate::{
    publisher::PublisherConfig,
    transport::{emit_message, TransportChannel},
};

/// The local participant's state, sampled once per tick
#[derive(Clone, Debug, PartialEq)]
pub struct LocalSample {
    pub position: Vec3,
    pub orientation: Quat,
    /// Units per second
    pub velocity: Vec3,
    pub animation: Option<String>,
}

impl LocalSample {
    pub fn new(position: Vec3, orientation: Quat, velocity: Vec3) -> Self {
        Self {
            position,
            orientation,
            velocity,
            animation: None,
        }
    }

    pub fn with_animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = Some(animation.into());
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Timestamp of the `pose-update` sent this tick
    pub pose_timestamp_ms: Option<u64>,
    pub animation_published: bool,
}

impl PublishReport {
    pub fn is_empty(&self) -> bool {
        self.pose_timestamp_ms.is_none() && !self.animation_published
    }
}

struct Published {
    position: Vec3,
    orientation: Quat,
}

pub struct LocalStatePublisher {
    config: PublisherConfig,
    local_id: Option<NetworkId>,
    suspended: bool,
    last_tick_ms: Option<u64>,
    last_timestamp_ms: Option<u64>,
    last_pose: Option<Published>,
    last_animation: Option<String>,
}

impl LocalStatePublisher {
    pub fn new(config: PublisherConfig) -> Self {
        Self {
            config,
            local_id: None,
            suspended: false,
            last_tick_ms: None,
            last_timestamp_ms: None,
            last_pose: None,
            last_animation: None,
        }
    }

    pub fn local_id(&self) -> Option<&NetworkId> {
        self.local_id.as_ref()
    }

    pub fn set_local_id(&mut self, id: NetworkId) {
        if self.local_id.as_ref() != Some(&id) {
            debug!("Publishing local state as {}", id);
            self.local_id = Some(id);
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn suspend(&mut self) {
        if !self.suspended {
            info!("Local state publishing suspended");
            self.suspended = true;
        }
    }

    /// Resumes publishing with fresh baselines, so the next tick publishes
    /// both pose and animation again
    pub fn resume(&mut self) {
        self.suspended = false;
        self.reset_baselines();
    }

    pub(crate) fn reset(&mut self) {
        self.suspended = false;
        self.local_id = None;
        self.reset_baselines();
    }

    pub fn tick<T: TransportChannel + ?Sized>(
        &mut self,
        now_ms: u64,
        sample: &LocalSample,
        transport: &mut T,
    ) -> Result<PublishReport, MessageError> {
        let mut report = PublishReport::default();

        if self.suspended {
            return Ok(report);
        }
        let Some(local_id) = self.local_id.clone() else {
            trace!("Local id unknown, nothing published");
            return Ok(report);
        };

        if let Some(last_tick_ms) = self.last_tick_ms {
            if now_ms < last_tick_ms.saturating_add(self.config.tick_interval_ms) {
                return Ok(report);
            }
        }
        self.last_tick_ms = Some(now_ms);

        if self.pose_changed(sample) {
            let timestamp_ms = match self.last_timestamp_ms {
                Some(last) => now_ms.max(last.saturating_add(1)),
                None => now_ms,
            };
            let update = PoseUpdate {
                id: local_id.clone(),
                position: sample.position.into(),
                orientation: orientation_to_euler_degrees(sample.orientation).into(),
                velocity: sample.velocity.into(),
                timestamp_ms,
            };
            emit_message(transport, &update)?;

            self.last_timestamp_ms = Some(timestamp_ms);
            self.last_pose = Some(Published {
                position: sample.position,
                orientation: sample.orientation,
            });
            report.pose_timestamp_ms = Some(timestamp_ms);
        }

        if let Some(animation) = &sample.animation {
            if self.last_animation.as_ref() != Some(animation) {
                let changed = AnimationChanged {
                    id: local_id,
                    state: animation.clone(),
                };
                emit_message(transport, &changed)?;
                self.last_animation = Some(animation.clone());
                report.animation_published = true;
            }
        }

        Ok(report)
    }

    fn pose_changed(&self, sample: &LocalSample) -> bool {
        let Some(last) = &self.last_pose else {
            return true;
        };

        last.position.distance(sample.position) > self.config.position_threshold
            || sample.velocity.length() > self.config.velocity_epsilon
            || angle_between_degrees(last.orientation, sample.orientation)
                > self.config.rotation_threshold_degrees
    }

    fn reset_baselines(&mut self) {
        self.last_tick_ms = None;
        self.last_pose = None;
        self.last_animation = None;
    }
}
