//! # Cohort Client
//! Keeps the remote participants of a shared real-time session in sync:
//! smooth movement from irregular pose updates, an all-at-once spawn barrier
//! when the session starts, and bandwidth-aware publishing of the local
//! participant's state.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use cohort_shared::{
        BufferConfig, EntityStateBuffer, EventName, GameplayNotice, NetworkId, NoticeCategory,
        Payload, Pose, Quat, RenderMode, RenderPose, RetryPolicy, Snapshot, SpawnSlot, Timestamp,
        Vec3,
    };
}

mod config;
mod dispatch;
mod error;
mod events;
mod publisher;
mod session;
mod spawn;
mod transport;
mod world;

pub use config::SyncConfig;
pub use dispatch::{DispatchQueue, DispatchSender, Dispatched, HandlerRegistry, NoticeHandler};
pub use error::{InitError, SyncError};
pub use events::{
    AnimationEvent, CountdownEvent, DespawnEvent, DisconnectEvent, ErrorEvent, GameStartEvent,
    GameplayEvent, LobbyEvent, LocalSpawnEvent, SpawnEvent, SyncEvent, SyncEvents,
};
pub use publisher::{LocalSample, LocalStatePublisher, PublishReport, PublisherConfig};
pub use session::{resolve_order, InitStage, SyncSession};
pub use spawn::{BarrierState, GameStartReport, SpawnConfig, SpawnCoordinator};
pub use transport::TransportChannel;
pub use world::{
    JoinOutcome, LeftOutcome, NoticeOutcome, PendingEntry, RemoteEntity, RemoteEntityRegistry,
    RouteOutcome,
};
