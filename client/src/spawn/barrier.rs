/// Progress of the session-start barrier. Only ever moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarrierState {
    Idle,
    LobbyWaiting { wait_ms: u64 },
    Countdown { remaining: u32 },
    Started,
}

impl BarrierState {
    /// Position in the forward-only progression
    pub fn rank(&self) -> u8 {
        match self {
            BarrierState::Idle => 0,
            BarrierState::LobbyWaiting { .. } => 1,
            BarrierState::Countdown { .. } => 2,
            BarrierState::Started => 3,
        }
    }

    pub fn is_started(&self) -> bool {
        *self == BarrierState::Started
    }
}
