use cohort_shared::{
    BufferConfig, EntityStateBuffer, NetworkId, Payload, Pose, RenderMode, RenderPose,
    SpawnDescriptor, SpawnSlot,
};

/// A participant that is visible in the local world
pub struct RemoteEntity {
    id: NetworkId,
    display_name: String,
    class_tag: String,
    spawn_slot: SpawnSlot,
    stats: Payload,
    buffer: EntityStateBuffer,
    render_pose: Option<RenderPose>,
    animation: Option<String>,
}

impl RemoteEntity {
    pub(crate) fn new(
        id: NetworkId,
        descriptor: SpawnDescriptor,
        stats: Payload,
        config: BufferConfig,
        now_ms: u64,
    ) -> Self {
        let mut buffer = EntityStateBuffer::new(config);
        if let Some(initial_pose) = &descriptor.initial_pose {
            let snapshot = initial_pose.to_snapshot(now_ms);
            if initial_pose.timestamp_ms.is_some() {
                buffer.ingest(snapshot);
            } else {
                buffer.seed(snapshot.pose());
            }
        }

        Self {
            id,
            display_name: descriptor.display_name,
            class_tag: descriptor.class_tag,
            spawn_slot: descriptor.spawn_slot,
            stats,
            buffer,
            render_pose: None,
            animation: None,
        }
    }

    pub fn id(&self) -> &NetworkId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn class_tag(&self) -> &str {
        &self.class_tag
    }

    pub fn spawn_slot(&self) -> SpawnSlot {
        self.spawn_slot
    }

    pub fn stats(&self) -> &Payload {
        &self.stats
    }

    /// Pose computed on the last tick, `None` until a pose is known
    pub fn render_pose(&self) -> Option<Pose> {
        self.render_pose.map(|render| render.pose)
    }

    pub fn render_mode(&self) -> Option<RenderMode> {
        self.render_pose.map(|render| render.mode)
    }

    pub fn is_extrapolating(&self) -> bool {
        self.buffer.is_extrapolating()
    }

    pub fn is_frozen(&self) -> bool {
        self.buffer.is_frozen()
    }

    /// Last animation state tag received
    pub fn animation(&self) -> Option<&str> {
        self.animation.as_deref()
    }

    pub fn buffer(&self) -> &EntityStateBuffer {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut EntityStateBuffer {
        &mut self.buffer
    }

    pub(crate) fn set_stats(&mut self, stats: Payload) {
        self.stats = stats;
    }

    /// Returns false when the tag did not change
    pub(crate) fn set_animation(&mut self, state: &str) -> bool {
        if self.animation.as_deref() == Some(state) {
            return false;
        }
        self.animation = Some(state.to_string());
        true
    }

    pub(crate) fn update_render_pose(&mut self, now_ms: u64) -> Option<RenderPose> {
        self.render_pose = self.buffer.compute_render_pose(now_ms);
        self.render_pose
    }

    pub(crate) fn freeze(&mut self) {
        self.buffer.freeze();
    }
}
