//! ## `SpawnCoordinator` – the session-start barrier
//!
//! ```text
//!   Idle ──lobby-created──► LobbyWaiting ──countdown-tick──► Countdown
//!     │                          │                              │
//!     └──────────────────────────┴─────────game-start───────────┴──► Started
//! ```
//!
//! Reaching `Started` flushes every pending participant of the registry in
//! one step and tells the host, exactly once, to spawn the local participant.
//! Every later start signal is a no-op.
//!
//! If the session authority never says anything, a fallback start fires once
//! `fallback_min_pending` participants have been pending for
//! `fallback_timeout_ms`. It is reported as non-authoritative.

use log::{debug, info, warn};

use cohort_shared::{NetworkId, RosterEntry, SpawnSlot};

use crate::{
    spawn::{BarrierState, SpawnConfig},
    world::RemoteEntityRegistry,
};

/// What happened when the barrier fired
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStartReport {
    /// Entities made visible by the flush, ordered by spawn slot
    pub spawned: Vec<NetworkId>,
    /// True if the start was not announced by the session authority
    pub by_fallback: bool,
    /// Spawn slot for the local participant, if one is known
    pub local_spawn_slot: Option<SpawnSlot>,
}

pub struct SpawnCoordinator {
    config: SpawnConfig,
    state: BarrierState,
    authority_heard: bool,
    armed_since_ms: Option<u64>,
    started_by_fallback: bool,
    local_spawn_slot: Option<SpawnSlot>,
}

impl SpawnCoordinator {
    pub fn new(config: SpawnConfig) -> Self {
        Self {
            config,
            state: BarrierState::Idle,
            authority_heard: false,
            armed_since_ms: None,
            started_by_fallback: false,
            local_spawn_slot: None,
        }
    }

    pub fn state(&self) -> BarrierState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state.is_started()
    }

    pub fn started_by_fallback(&self) -> bool {
        self.started_by_fallback
    }

    /// Remembers the slot reported by a roster snapshot, used when the start
    /// signal does not carry one
    pub fn set_local_spawn_slot(&mut self, spawn_slot: SpawnSlot) {
        self.local_spawn_slot = Some(spawn_slot);
    }

    /// Returns true if the state advanced
    pub fn on_lobby_created(&mut self, wait_ms: u64) -> bool {
        self.authority_heard = true;
        if self.state.rank() >= 1 {
            debug!("Ignoring lobby-created in state {:?}", self.state);
            return false;
        }
        info!("Lobby created, waiting up to {}ms", wait_ms);
        self.state = BarrierState::LobbyWaiting { wait_ms };
        true
    }

    /// Returns true if the state advanced
    pub fn on_countdown_tick(&mut self, remaining: u32) -> bool {
        self.authority_heard = true;
        match self.state {
            BarrierState::Started => {
                debug!("Ignoring countdown-tick after start");
                false
            }
            BarrierState::Countdown { remaining: current } if remaining >= current => false,
            _ => {
                info!("Countdown: {} remaining", remaining);
                self.state = BarrierState::Countdown { remaining };
                true
            }
        }
    }

    /// Fires the barrier. `None` if it had already fired.
    pub fn on_game_start(
        &mut self,
        registry: &mut RemoteEntityRegistry,
        roster: &[RosterEntry],
        your_spawn_slot: Option<SpawnSlot>,
        now_ms: u64,
    ) -> Option<GameStartReport> {
        self.authority_heard = true;
        if self.is_started() {
            debug!("Duplicate game-start ignored");
            return None;
        }
        Some(self.start(registry, roster, your_spawn_slot, now_ms, false))
    }

    /// Fires the barrier locally if the fallback conditions hold
    pub fn check_fallback(
        &mut self,
        registry: &mut RemoteEntityRegistry,
        now_ms: u64,
    ) -> Option<GameStartReport> {
        if !self.config.fallback_enabled || self.authority_heard || self.is_started() {
            self.armed_since_ms = None;
            return None;
        }

        if registry.pending_len() < self.config.fallback_min_pending {
            self.armed_since_ms = None;
            return None;
        }

        let armed_since_ms = *self.armed_since_ms.get_or_insert(now_ms);
        if now_ms.saturating_sub(armed_since_ms) < self.config.fallback_timeout_ms {
            return None;
        }

        warn!(
            "No start signal {}ms after {} participants joined, starting without the session authority",
            self.config.fallback_timeout_ms,
            registry.pending_len()
        );
        Some(self.start(registry, &[], None, now_ms, true))
    }

    pub fn reset(&mut self) {
        self.state = BarrierState::Idle;
        self.authority_heard = false;
        self.armed_since_ms = None;
        self.started_by_fallback = false;
        self.local_spawn_slot = None;
    }

    fn start(
        &mut self,
        registry: &mut RemoteEntityRegistry,
        roster: &[RosterEntry],
        your_spawn_slot: Option<SpawnSlot>,
        now_ms: u64,
        by_fallback: bool,
    ) -> GameStartReport {
        self.state = BarrierState::Started;
        self.started_by_fallback = by_fallback;
        self.armed_since_ms = None;

        let spawned = registry.flush_pending(roster, now_ms);

        let roster_slot = registry.local_id().and_then(|local_id| {
            roster
                .iter()
                .find(|entry| &entry.id == local_id)
                .map(|entry| entry.spawn_slot)
        });
        let local_spawn_slot = your_spawn_slot.or(roster_slot).or(self.local_spawn_slot);

        info!(
            "Session started{}, {} remote entities visible",
            if by_fallback { " (fallback)" } else { "" },
            registry.active_len()
        );

        GameStartReport {
            spawned,
            by_fallback,
            local_spawn_slot,
        }
    }
}
