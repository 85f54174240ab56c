//! # `BufferConfig` – reconstruction tuning knobs
//!
//! The numbers that decide how far behind real time a remote entity is
//! rendered, how long it may be dead-reckoned, and when a discrepancy is too
//! large to smooth over. They are handed to every `EntityStateBuffer` at
//! construction and never change for the lifetime of a session.
//!
//! ### Latency versus smoothness
//! `interpolation_delay_ms` should cover at least two publish intervals of
//! the sender (20 Hz senders publish every 50 ms), so that a bracketing pair
//! of snapshots is almost always available at the delayed render time.

/// Contains Config properties which will be used by every `EntityStateBuffer`
#[derive(Clone, Debug, PartialEq)]
pub struct BufferConfig {
    /// Maximum number of snapshots buffered per entity. The oldest snapshot
    /// is evicted first.
    pub capacity: usize,
    /// How far before the oldest snapshot still needed for interpolation
    /// older snapshots are kept. Incoming snapshots older than this relative
    /// to the newest buffered one are dropped.
    pub retention_ms: u64,
    /// Fixed delay between "now" and the time that is rendered.
    pub interpolation_delay_ms: u64,
    /// Longest time an entity is dead-reckoned past its newest snapshot.
    pub max_prediction_ms: u64,
    /// Distance, in world units, beyond which a new snapshot is applied as a
    /// snap correction instead of a smooth target.
    pub snap_distance: f32,
    /// Orientation change, in degrees, beyond which a new snapshot is applied
    /// as a snap correction.
    pub snap_rotation_degrees: f32,
    /// Exponential easing rate (per second) of the rendered position toward
    /// the target. `None` renders the target directly.
    pub position_smoothing_rate: Option<f32>,
    /// Exponential easing rate (per second) of the rendered orientation
    /// toward the target. `None` renders the target directly.
    pub rotation_smoothing_rate: Option<f32>,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: 32,
            retention_ms: 1000,
            interpolation_delay_ms: 100,
            max_prediction_ms: 1000,
            snap_distance: 5.0,
            snap_rotation_degrees: 90.0,
            position_smoothing_rate: Some(15.0),
            rotation_smoothing_rate: Some(15.0),
        }
    }
}

impl BufferConfig {
    /// Same as the default, with easing switched off so the rendered pose is
    /// always exactly the computed target.
    pub fn unsmoothed() -> Self {
        Self {
            position_smoothing_rate: None,
            rotation_smoothing_rate: None,
            ..Self::default()
        }
    }
}
