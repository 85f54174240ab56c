//! ## `RemoteEntityRegistry` – who exists, and in which phase
//!
//! Every known participant other than the local one is in exactly one of two
//! maps:
//!
//! ```text
//!   member-joined (barrier not started) ─► pending ──flush_pending──► active
//!   member-joined (barrier started)     ─────────────── create ─────► active
//!   member-left                         ─► removed from either map
//! ```
//!
//! Pending entries are invisible. Positional messages addressed to them are
//! discarded, since the spawn pose comes from the descriptor or the roster
//! at flush time. Nothing but `create` and `flush_pending` ever makes an
//! entity active; in particular a `pose-update` never does.

use std::collections::{hash_map::Entry, HashMap};

use log::{debug, info, trace, warn};

use cohort_shared::{
    BufferConfig, GameplayNotice, IngestOutcome, NetworkId, Payload, RosterEntry, Snapshot,
    SpawnDescriptor,
};

use crate::{dispatch::HandlerRegistry, world::RemoteEntity};

/// A participant announced before the spawn barrier fired
#[derive(Clone, Debug, PartialEq)]
pub struct PendingEntry {
    pub id: NetworkId,
    pub descriptor: SpawnDescriptor,
    pub stats: Payload,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Held back until the barrier fires
    Queued,
    /// Created immediately, the barrier had already fired
    Spawned,
    /// Already active; nothing changed
    AlreadyActive,
    /// The id is the local participant's
    Local,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Handed to the entity's state buffer
    Buffered(IngestOutcome),
    /// Applied to the active entity
    Applied,
    /// Active entity already had this value
    Unchanged,
    /// Addressed to a pending entry; positional data is dropped
    DiscardedPending,
    UnknownEntity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeftOutcome {
    DiscardedPending,
    Despawned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeOutcome {
    /// Seen by this many handlers
    Handled(usize),
    /// Addressed to an active entity, but no handler is registered for it
    Unhandled,
    DiscardedPending,
    UnknownEntity,
}

pub struct RemoteEntityRegistry {
    buffer_config: BufferConfig,
    local_id: Option<NetworkId>,
    pending: HashMap<NetworkId, PendingEntry>,
    active: HashMap<NetworkId, RemoteEntity>,
}

impl RemoteEntityRegistry {
    pub fn new(buffer_config: BufferConfig) -> Self {
        Self {
            buffer_config,
            local_id: None,
            pending: HashMap::new(),
            active: HashMap::new(),
        }
    }

    // Queries

    pub fn local_id(&self) -> Option<&NetworkId> {
        self.local_id.as_ref()
    }

    pub fn get(&self, id: &NetworkId) -> Option<&RemoteEntity> {
        self.active.get(id)
    }

    pub fn pending_entry(&self, id: &NetworkId) -> Option<&PendingEntry> {
        self.pending.get(id)
    }

    pub fn is_pending(&self, id: &NetworkId) -> bool {
        self.pending.contains_key(id)
    }

    pub fn is_active(&self, id: &NetworkId) -> bool {
        self.active.contains_key(id)
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemoteEntity> {
        self.active.values()
    }

    pub fn pending_ids(&self) -> impl Iterator<Item = &NetworkId> {
        self.pending.keys()
    }

    // Mutations

    /// Binds the local participant's id. Anything registered under that id
    /// so far is dropped, the local participant is never a remote entity.
    pub fn set_local_id(&mut self, id: NetworkId) {
        if self.pending.remove(&id).is_some() || self.active.remove(&id).is_some() {
            debug!("Removed local participant {} from remote entities", id);
        }
        self.local_id = Some(id);
    }

    pub fn on_member_joined(
        &mut self,
        id: NetworkId,
        descriptor: SpawnDescriptor,
        stats: Payload,
        barrier_started: bool,
        now_ms: u64,
    ) -> JoinOutcome {
        if self.is_local(&id) {
            trace!("Ignoring join of local participant {}", id);
            return JoinOutcome::Local;
        }

        if self.active.contains_key(&id) {
            debug!("Join for already active entity {}", id);
            return JoinOutcome::AlreadyActive;
        }

        if barrier_started {
            self.create(id, descriptor, stats, now_ms);
            return JoinOutcome::Spawned;
        }

        match self.pending.entry(id) {
            Entry::Occupied(mut entry) => {
                debug!("Replacing pending descriptor of {}", entry.key());
                let pending = entry.get_mut();
                pending.descriptor = descriptor;
                pending.stats = stats;
            }
            Entry::Vacant(entry) => {
                trace!("Queued {} until the spawn barrier fires", entry.key());
                let id = entry.key().clone();
                entry.insert(PendingEntry {
                    id,
                    descriptor,
                    stats,
                });
            }
        }
        JoinOutcome::Queued
    }

    pub fn on_snapshot_received(&mut self, id: &NetworkId, snapshot: Snapshot) -> RouteOutcome {
        if let Some(entity) = self.active.get_mut(id) {
            return RouteOutcome::Buffered(entity.buffer_mut().ingest(snapshot));
        }
        if self.pending.contains_key(id) {
            trace!("Discarding pose for pending entity {}", id);
            return RouteOutcome::DiscardedPending;
        }
        if !self.is_local(id) {
            debug!("Pose for unknown entity {}", id);
        }
        RouteOutcome::UnknownEntity
    }

    pub fn on_member_left(&mut self, id: &NetworkId) -> Option<LeftOutcome> {
        if self.active.remove(id).is_some() {
            info!("Remote entity {} despawned", id);
            return Some(LeftOutcome::Despawned);
        }
        if self.pending.remove(id).is_some() {
            debug!("Pending entity {} left before spawning", id);
            return Some(LeftOutcome::DiscardedPending);
        }
        debug!("Leave for unknown entity {}", id);
        None
    }

    pub fn on_animation_state_received(&mut self, id: &NetworkId, state: &str) -> RouteOutcome {
        if let Some(entity) = self.active.get_mut(id) {
            return if entity.set_animation(state) {
                RouteOutcome::Applied
            } else {
                RouteOutcome::Unchanged
            };
        }
        if self.pending.contains_key(id) {
            return RouteOutcome::DiscardedPending;
        }
        debug!("Animation state for unknown entity {}", id);
        RouteOutcome::UnknownEntity
    }

    pub fn on_gameplay_notice(
        &mut self,
        notice: &GameplayNotice,
        handlers: &mut HandlerRegistry,
    ) -> NoticeOutcome {
        if self.active.contains_key(&notice.id) {
            return match handlers.dispatch(notice) {
                0 => NoticeOutcome::Unhandled,
                handled => NoticeOutcome::Handled(handled),
            };
        }
        if self.pending.contains_key(&notice.id) {
            debug!("Dropping '{}' for pending entity {}", notice.event, notice.id);
            return NoticeOutcome::DiscardedPending;
        }
        warn!("'{}' for unknown entity {}", notice.event, notice.id);
        NoticeOutcome::UnknownEntity
    }

    /// Caches non-positional data. Works for pending and active entities.
    pub fn on_stats_received(&mut self, id: &NetworkId, stats: Payload) -> RouteOutcome {
        if let Some(pending) = self.pending.get_mut(id) {
            pending.stats = stats;
            return RouteOutcome::Applied;
        }
        if let Some(entity) = self.active.get_mut(id) {
            entity.set_stats(stats);
            return RouteOutcome::Applied;
        }
        RouteOutcome::UnknownEntity
    }

    /// Makes an entity visible. Returns false if it already was.
    pub fn create(
        &mut self,
        id: NetworkId,
        descriptor: SpawnDescriptor,
        stats: Payload,
        now_ms: u64,
    ) -> bool {
        if self.is_local(&id) || self.active.contains_key(&id) {
            return false;
        }
        self.pending.remove(&id);

        info!(
            "Spawning remote entity {} ({}) at slot {}",
            id, descriptor.class_tag, descriptor.spawn_slot
        );
        let entity = RemoteEntity::new(
            id.clone(),
            descriptor,
            stats,
            self.buffer_config.clone(),
            now_ms,
        );
        self.active.insert(id, entity);
        true
    }

    /// Promotes every pending entry in one step. Roster entries override the
    /// spawn slot and pose of the pending entry with the same id; roster
    /// entries nobody announced are created as well. Returns the created ids
    /// ordered by spawn slot.
    pub fn flush_pending(&mut self, roster: &[RosterEntry], now_ms: u64) -> Vec<NetworkId> {
        let mut to_create: Vec<PendingEntry> = self.pending.drain().map(|(_, entry)| entry).collect();

        for pending in to_create.iter_mut() {
            if let Some(entry) = roster.iter().find(|entry| entry.id == pending.id) {
                pending.descriptor.spawn_slot = entry.spawn_slot;
                if entry.pose.is_some() {
                    pending.descriptor.initial_pose = entry.pose.clone();
                }
                if !entry.stats.is_null() {
                    pending.stats = entry.stats.clone();
                }
            }
        }

        for entry in roster {
            let known = self.active.contains_key(&entry.id)
                || to_create.iter().any(|pending| pending.id == entry.id);
            if known || self.is_local(&entry.id) {
                continue;
            }
            to_create.push(PendingEntry {
                id: entry.id.clone(),
                descriptor: entry.descriptor(),
                stats: entry.stats.clone(),
            });
        }

        to_create.sort_by(|a, b| {
            a.descriptor
                .spawn_slot
                .cmp(&b.descriptor.spawn_slot)
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut created = Vec::with_capacity(to_create.len());
        for pending in to_create {
            let id = pending.id.clone();
            if self.create(pending.id, pending.descriptor, pending.stats, now_ms) {
                created.push(id);
            }
        }

        info!("Spawn barrier flushed {} entities", created.len());
        created
    }

    /// Recomputes the render pose of every active entity. Returns how many
    /// have one.
    pub fn compute_render_poses(&mut self, now_ms: u64) -> usize {
        let mut posed = 0;
        for entity in self.active.values_mut() {
            if entity.update_render_pose(now_ms).is_some() {
                posed += 1;
            }
        }
        posed
    }

    pub fn freeze_all(&mut self) {
        for entity in self.active.values_mut() {
            entity.freeze();
        }
    }

    /// Drops every pending and active entity along with its buffer
    pub fn clear(&mut self) {
        self.pending.clear();
        self.active.clear();
        self.local_id = None;
    }

    fn is_local(&self, id: &NetworkId) -> bool {
        self.local_id.as_ref() == Some(id)
    }
}
