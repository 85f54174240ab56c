mod init;
mod sync_session;

pub use init::{resolve_order, InitStage};
pub use sync_session::SyncSession;
