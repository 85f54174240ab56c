use std::default::Default;

use cohort_shared::{BufferConfig, NetworkId, RetryPolicy};

use crate::{publisher::PublisherConfig, spawn::SpawnConfig};

/// Contains Config properties which will be used by a `SyncSession`
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Reconstruction settings given to the state buffer of every remote
    /// entity
    pub buffer: BufferConfig,
    /// Rate and thresholds of local state publishing
    pub publisher: PublisherConfig,
    /// Spawn barrier settings, including the fallback start
    pub spawn: SpawnConfig,
    /// Retry schedule of `roster-request` on join and late join
    pub roster_retry: RetryPolicy,
    /// Network id of the local participant, if known before joining.
    /// Otherwise it is taken from the first `roster-snapshot`.
    pub local_id: Option<NetworkId>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            buffer: BufferConfig::default(),
            publisher: PublisherConfig::default(),
            spawn: SpawnConfig::default(),
            roster_retry: RetryPolicy::default(),
            local_id: None,
        }
    }
}
