pub mod assertions;
pub mod logging;
pub mod mock_transport;
pub mod payloads;
pub mod session;

pub use logging::init_logging;
pub use mock_transport::MockTransport;
pub use session::{deliver_pose, start_with, started_session, test_config, TestSession, LOCAL_ID};
