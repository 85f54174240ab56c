use std::default::Default;

/// Contains Config properties which will be used by the `SpawnCoordinator`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnConfig {
    /// Whether the barrier may start locally when the session authority
    /// stays silent. Such a start is never authoritative.
    pub fallback_enabled: bool,
    /// How long enough participants must have been pending, without any
    /// lobby, countdown or start notice, before the fallback start fires
    pub fallback_timeout_ms: u64,
    /// Pending participants required to arm the fallback start
    pub fallback_min_pending: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            fallback_enabled: true,
            fallback_timeout_ms: 8000,
            fallback_min_pending: 2,
        }
    }
}
