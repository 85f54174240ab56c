//! # Cohort Shared
//! Data model, pose reconstruction and wire messages shared by every part of
//! the cohort entity synchronization layer.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

cfg_if! {
    if #[cfg(all(target_arch = "wasm32", not(feature = "wbindgen")))]
    {
        compile_error!("wasm target for 'cohort_shared' crate requires the 'wbindgen' feature to be enabled.");
    }
}

mod backends;
mod math;
mod messages;
mod pose;
mod snapshot_list;
mod state_buffer;
mod types;

pub mod retry;

pub use backends::Timestamp;
pub use math::{
    angle_between_degrees, clamp01, orientation_from_euler_degrees,
    orientation_to_euler_degrees, smoothing_factor, EulerRot, Quat, Vec3, Vec3Record,
};
pub use messages::{
    error::MessageError,
    event_name::{EventName, NoticeCategory},
    inbound::InboundMessage,
    member::{AnimationChanged, MemberJoined, MemberLeft, SpawnDescriptor},
    notice::GameplayNotice,
    pose_update::{PoseRecord, PoseUpdate},
    roster::{RosterEntry, RosterRequest, RosterSnapshot},
    session::{CountdownTick, GameStart, LobbyCreated},
    OutboundMessage, Payload,
};
pub use pose::{Pose, Snapshot};
pub use retry::{Backoff, RetryError, RetryPoll, RetryPolicy, RetrySchedule};
pub use snapshot_list::{SnapshotList, SnapshotListError};
pub use state_buffer::{BufferConfig, EntityStateBuffer, IngestOutcome, RenderMode, RenderPose};
pub use types::{NetworkId, SessionGeneration, SpawnSlot};
