use cohort_client::{SyncConfig, SyncEvents, SyncSession};
use cohort_shared::{BufferConfig, NetworkId, Payload};

use crate::helpers::{init_logging, payloads, MockTransport};

pub type TestSession = SyncSession<MockTransport>;

pub const LOCAL_ID: &str = "local";

/// Local id known up front, unsmoothed buffers that only snap on teleports
pub fn test_config() -> SyncConfig {
    SyncConfig {
        buffer: BufferConfig {
            snap_distance: 100.0,
            ..BufferConfig::unsmoothed()
        },
        local_id: Some(NetworkId::new(LOCAL_ID)),
        ..SyncConfig::default()
    }
}

/// An initialized session plus a handle on its transport
pub fn start_with(config: SyncConfig) -> (TestSession, MockTransport) {
    init_logging();
    let transport = MockTransport::new();
    let mut session = SyncSession::new(config, transport.clone());
    session
        .initialize(0)
        .expect("session initializes with the declared stage graph");
    (session, transport)
}

/// A session whose barrier has fired with `ids` visible
pub fn started_session(ids: &[&str], now_ms: u64) -> (TestSession, MockTransport, SyncEvents) {
    let (mut session, transport) = start_with(test_config());
    for (slot, id) in ids.iter().enumerate() {
        transport.deliver("member-joined", payloads::member_joined(id, slot as u16));
    }
    transport.deliver("game-start", payloads::game_start());
    let events = session.tick(now_ms, None).expect("initialized");
    (session, transport, events)
}

/// Sends one `pose-update` straight into the session
pub fn deliver_pose(transport: &MockTransport, id: &str, x: f32, timestamp_ms: u64) -> Payload {
    let payload = payloads::pose_update(id, [x, 0.0, 0.0], [0.0, 0.0, 0.0], timestamp_ms);
    transport.deliver("pose-update", payload.clone());
    payload
}
