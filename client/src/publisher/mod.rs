mod config;
mod local_state_publisher;

pub use config::PublisherConfig;
pub use local_state_publisher::{LocalSample, LocalStatePublisher, PublishReport};
