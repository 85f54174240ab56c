use serde::{Deserialize, Serialize};

use crate::{
    messages::{
        event_name::EventName, member::SpawnDescriptor, pose_update::PoseRecord,
        OutboundMessage, Payload,
    },
    types::{NetworkId, SpawnSlot},
};

/// One participant as listed by the session authority
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: NetworkId,
    #[serde(default)]
    pub display_name: String,
    pub class_tag: String,
    pub spawn_slot: SpawnSlot,
    #[serde(default)]
    pub pose: Option<PoseRecord>,
    #[serde(default)]
    pub stats: Payload,
}

impl RosterEntry {
    pub fn descriptor(&self) -> SpawnDescriptor {
        SpawnDescriptor {
            display_name: self.display_name.clone(),
            class_tag: self.class_tag.clone(),
            spawn_slot: self.spawn_slot,
            initial_pose: self.pose.clone(),
        }
    }
}

/// `roster-snapshot`: the full current roster, answering a `roster-request`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSnapshot {
    #[serde(default)]
    pub players: Vec<RosterEntry>,
    pub your_id: NetworkId,
    pub your_spawn_slot: SpawnSlot,
}

impl RosterSnapshot {
    /// Entries for everyone except the caller
    pub fn remote_players(&self) -> impl Iterator<Item = &RosterEntry> {
        self.players
            .iter()
            .filter(move |entry| entry.id != self.your_id)
    }
}

/// `roster-request`, sent on join and re-join
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterRequest {
    pub attempt: u32,
}

impl OutboundMessage for RosterRequest {
    const EVENT: EventName = EventName::RosterRequest;
}
