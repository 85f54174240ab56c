mod config;
mod entity_state_buffer;

pub use config::BufferConfig;
pub use entity_state_buffer::{EntityStateBuffer, IngestOutcome, RenderMode, RenderPose};
