use std::default::Default;

/// Contains Config properties which will be used by the `LocalStatePublisher`
#[derive(Clone, Debug, PartialEq)]
pub struct PublisherConfig {
    /// Minimum time between two publish decisions (50ms is 20 Hz)
    pub tick_interval_ms: u64,
    /// Distance from the last published position that warrants a new update
    pub position_threshold: f32,
    /// Speed above which the local participant counts as moving, so updates
    /// keep flowing even while each step is below `position_threshold`
    pub velocity_epsilon: f32,
    /// Orientation change, in degrees, that warrants a new update
    pub rotation_threshold_degrees: f32,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
            position_threshold: 0.01,
            velocity_epsilon: 0.001,
            rotation_threshold_degrees: 1.0,
        }
    }
}
