use serde::{Deserialize, Serialize};

use crate::{
    messages::{
        event_name::EventName, pose_update::PoseRecord, OutboundMessage, Payload,
    },
    types::{NetworkId, SpawnSlot},
};

/// Everything needed to make a participant visible at its spawn point
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnDescriptor {
    pub display_name: String,
    pub class_tag: String,
    pub spawn_slot: SpawnSlot,
    pub initial_pose: Option<PoseRecord>,
}

/// `member-joined`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberJoined {
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

impl MemberJoined {
    pub fn descriptor(&self) -> SpawnDescriptor {
        SpawnDescriptor {
            display_name: self.display_name.clone(),
            class_tag: self.class_tag.clone(),
            spawn_slot: self.spawn_slot,
            initial_pose: self.pose.clone(),
        }
    }
}

/// `member-left`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberLeft {
    pub id: NetworkId,
}

/// `animation-changed`, in both directions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationChanged {
    pub id: NetworkId,
    pub state: String,
}

impl OutboundMessage for AnimationChanged {
    const EVENT: EventName = EventName::AnimationChanged;
}
