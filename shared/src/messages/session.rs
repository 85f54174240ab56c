use serde::{Deserialize, Serialize};

use crate::{messages::roster::RosterEntry, types::SpawnSlot};

/// `lobby-created`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyCreated {
    pub wait_ms: u64,
}

/// `countdown-tick`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownTick {
    pub remaining: u32,
}

/// `game-start`. The roster is optional; when present it is authoritative
/// for spawn slots and initial poses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStart {
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
    #[serde(default)]
    pub your_spawn_slot: Option<SpawnSlot>,
}
