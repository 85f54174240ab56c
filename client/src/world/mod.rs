mod registry;
mod remote_entity;

pub use registry::{
    JoinOutcome, LeftOutcome, NoticeOutcome, PendingEntry, RemoteEntityRegistry, RouteOutcome,
};
pub use remote_entity::RemoteEntity;
