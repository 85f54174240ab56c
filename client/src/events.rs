use std::{mem, vec::IntoIter};

use cohort_shared::{GameplayNotice, NetworkId, SpawnSlot};

use crate::{spawn::GameStartReport, SyncError};

/// Everything a tick produced for the host. Read with
/// `events.read::<SpawnEvent>()` and friends.
pub struct SyncEvents {
    spawns: Vec<NetworkId>,
    despawns: Vec<NetworkId>,
    animations: Vec<(NetworkId, String)>,
    gameplay: Vec<GameplayNotice>,
    lobbies: Vec<u64>,
    countdowns: Vec<u32>,
    starts: Vec<GameStartReport>,
    local_spawns: Vec<Option<SpawnSlot>>,
    disconnections: Vec<()>,
    errors: Vec<SyncError>,
    empty: bool,
}

impl Default for SyncEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncEvents {
    pub(crate) fn new() -> Self {
        Self {
            spawns: Vec::new(),
            despawns: Vec::new(),
            animations: Vec::new(),
            gameplay: Vec::new(),
            lobbies: Vec::new(),
            countdowns: Vec::new(),
            starts: Vec::new(),
            local_spawns: Vec::new(),
            disconnections: Vec::new(),
            errors: Vec::new(),
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: SyncEvent>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: SyncEvent>(&self) -> bool {
        V::has(self)
    }

    pub(crate) fn push_spawn(&mut self, id: NetworkId) {
        self.spawns.push(id);
        self.empty = false;
    }

    pub(crate) fn push_despawn(&mut self, id: NetworkId) {
        self.despawns.push(id);
        self.empty = false;
    }

    pub(crate) fn push_animation(&mut self, id: NetworkId, state: String) {
        self.animations.push((id, state));
        self.empty = false;
    }

    pub(crate) fn push_gameplay(&mut self, notice: GameplayNotice) {
        self.gameplay.push(notice);
        self.empty = false;
    }

    pub(crate) fn push_lobby(&mut self, wait_ms: u64) {
        self.lobbies.push(wait_ms);
        self.empty = false;
    }

    pub(crate) fn push_countdown(&mut self, remaining: u32) {
        self.countdowns.push(remaining);
        self.empty = false;
    }

    /// Records the start along with its spawns and the local spawn signal
    pub(crate) fn push_start(&mut self, report: GameStartReport) {
        for id in &report.spawned {
            self.spawns.push(id.clone());
        }
        self.local_spawns.push(report.local_spawn_slot);
        self.starts.push(report);
        self.empty = false;
    }

    pub(crate) fn push_disconnection(&mut self) {
        self.disconnections.push(());
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: SyncError) {
        self.errors.push(error);
        self.empty = false;
    }
}

// Event Trait
pub trait SyncEvent {
    type Iter;

    fn iter(events: &mut SyncEvents) -> Self::Iter;

    fn has(events: &SyncEvents) -> bool;
}

macro_rules! sync_event {
    ($(#[$meta:meta])* $event:ident, $field:ident, $item:ty) => {
        $(#[$meta])*
        pub struct $event;
        impl SyncEvent for $event {
            type Iter = IntoIter<$item>;

            fn iter(events: &mut SyncEvents) -> Self::Iter {
                let list = mem::take(&mut events.$field);
                IntoIterator::into_iter(list)
            }

            fn has(events: &SyncEvents) -> bool {
                !events.$field.is_empty()
            }
        }
    };
}

sync_event!(
    /// A remote entity became visible
    SpawnEvent, spawns, NetworkId
);
sync_event!(
    /// A remote entity left and was removed
    DespawnEvent, despawns, NetworkId
);
sync_event!(AnimationEvent, animations, (NetworkId, String));
sync_event!(
    /// A gameplay notice for an active entity that no handler consumed
    GameplayEvent, gameplay, GameplayNotice
);
sync_event!(LobbyEvent, lobbies, u64);
sync_event!(CountdownEvent, countdowns, u32);
sync_event!(GameStartEvent, starts, GameStartReport);
sync_event!(
    /// The host should spawn the local participant now, at this slot if
    /// known. Emitted once per session.
    LocalSpawnEvent, local_spawns, Option<SpawnSlot>
);
sync_event!(DisconnectEvent, disconnections, ());
sync_event!(ErrorEvent, errors, SyncError);
