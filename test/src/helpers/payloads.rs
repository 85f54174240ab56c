//! Builders for inbound payloads, in the wire schema the session expects.

use serde_json::{json, Value};

use cohort_shared::Payload;

fn vec3(v: [f32; 3]) -> Value {
    json!({ "x": v[0], "y": v[1], "z": v[2] })
}

pub fn member_joined(id: &str, spawn_slot: u16) -> Payload {
    json!({
        "id": id,
        "displayName": id,
        "classTag": "warden",
        "spawnSlot": spawn_slot,
    })
}

pub fn member_joined_at(id: &str, spawn_slot: u16, position: [f32; 3]) -> Payload {
    json!({
        "id": id,
        "displayName": id,
        "classTag": "warden",
        "spawnSlot": spawn_slot,
        "pose": { "position": vec3(position) },
    })
}

pub fn member_left(id: &str) -> Payload {
    json!({ "id": id })
}

pub fn pose_update(id: &str, position: [f32; 3], velocity: [f32; 3], timestamp_ms: u64) -> Payload {
    json!({
        "id": id,
        "position": vec3(position),
        "orientation": vec3([0.0, 0.0, 0.0]),
        "velocity": vec3(velocity),
        "timestampMs": timestamp_ms,
    })
}

pub fn animation_changed(id: &str, state: &str) -> Payload {
    json!({ "id": id, "state": state })
}

pub fn lobby_created(wait_ms: u64) -> Payload {
    json!({ "waitMs": wait_ms })
}

pub fn countdown_tick(remaining: u32) -> Payload {
    json!({ "remaining": remaining })
}

pub fn game_start() -> Payload {
    json!({})
}

pub fn game_start_with(roster: Vec<Payload>, your_spawn_slot: u16) -> Payload {
    json!({ "roster": roster, "yourSpawnSlot": your_spawn_slot })
}

pub fn roster_entry(id: &str, spawn_slot: u16) -> Payload {
    json!({
        "id": id,
        "displayName": id,
        "classTag": "warden",
        "spawnSlot": spawn_slot,
    })
}

pub fn roster_snapshot(players: Vec<Payload>, your_id: &str, your_spawn_slot: u16) -> Payload {
    json!({ "players": players, "yourId": your_id, "yourSpawnSlot": your_spawn_slot })
}

pub fn notice(id: &str) -> Payload {
    json!({ "id": id, "amount": 5 })
}
