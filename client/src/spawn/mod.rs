mod barrier;
mod config;
mod coordinator;

pub use barrier::BarrierState;
pub use config::SpawnConfig;
pub use coordinator::{GameStartReport, SpawnCoordinator};
