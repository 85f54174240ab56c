use log::{debug, info, trace, warn};

use cohort_shared::{
    EventName, InboundMessage, NetworkId, Payload, RetryError, RetryPoll, RetrySchedule,
    RosterEntry, RosterRequest, RosterSnapshot, SessionGeneration,
};

use crate::{
    dispatch::{DispatchQueue, DispatchSender, Dispatched, HandlerRegistry},
    events::SyncEvents,
    publisher::{LocalSample, LocalStatePublisher},
    session::{resolve_order, InitStage},
    spawn::SpawnCoordinator,
    transport::{emit_message, TransportChannel},
    world::{JoinOutcome, LeftOutcome, NoticeOutcome, RemoteEntityRegistry, RouteOutcome},
    SyncConfig, SyncError,
};

/// Owns everything needed to keep one shared session in sync: the dispatch
/// queue, the remote entities, the spawn barrier and the local publisher.
///
/// `new` only constructs; `initialize` wires the session to the transport.
/// After `leave`, the session can be initialized again for the next one.
pub struct SyncSession<T: TransportChannel> {
    config: SyncConfig,
    transport: T,
    queue: DispatchQueue,
    dispatch_sender: Option<DispatchSender>,
    registry: RemoteEntityRegistry,
    coordinator: SpawnCoordinator,
    publisher: LocalStatePublisher,
    handlers: HandlerRegistry,
    roster_retry: RetrySchedule,
    roster_outstanding: bool,
    init_order: Vec<InitStage>,
    initialized: bool,
    disconnected: bool,
}

impl<T: TransportChannel> SyncSession<T> {
    pub fn new(config: SyncConfig, transport: T) -> Self {
        Self {
            registry: RemoteEntityRegistry::new(config.buffer.clone()),
            coordinator: SpawnCoordinator::new(config.spawn.clone()),
            publisher: LocalStatePublisher::new(config.publisher.clone()),
            roster_retry: RetrySchedule::new(config.roster_retry.clone()),
            config,
            transport,
            queue: DispatchQueue::new(),
            dispatch_sender: None,
            handlers: HandlerRegistry::new(),
            roster_outstanding: false,
            init_order: Vec::new(),
            initialized: false,
            disconnected: false,
        }
    }

    // Accessors

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn registry(&self) -> &RemoteEntityRegistry {
        &self.registry
    }

    pub fn coordinator(&self) -> &SpawnCoordinator {
        &self.coordinator
    }

    pub fn publisher(&self) -> &LocalStatePublisher {
        &self.publisher
    }

    /// Gameplay notice handlers. They are kept across `leave`.
    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// A sender for the current session, e.g. to report a lost connection
    /// with `DispatchSender::disconnected`
    pub fn sender(&self) -> DispatchSender {
        self.queue.sender()
    }

    pub fn generation(&self) -> SessionGeneration {
        self.queue.generation()
    }

    pub fn local_id(&self) -> Option<&NetworkId> {
        self.registry.local_id()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    /// Stages in the order the last `initialize` ran them
    pub fn init_order(&self) -> &[InitStage] {
        &self.init_order
    }

    // Lifecycle

    pub fn initialize(&mut self, now_ms: u64) -> Result<(), SyncError> {
        if self.initialized {
            debug!("Session already initialized");
            return Ok(());
        }

        let order = resolve_order(&InitStage::ALL, |stage| stage.dependencies().to_vec())?;
        for stage in &order {
            trace!("Initializing {:?}", stage);
            self.run_stage(*stage, now_ms)?;
        }

        info!(
            "Session joined (generation {}) after {:?}",
            self.queue.generation(),
            order
        );
        self.init_order = order;
        self.initialized = true;
        Ok(())
    }

    /// Drops every entity, resets the barrier and publisher, and invalidates
    /// everything still queued or in flight for this session
    pub fn leave(&mut self) {
        self.registry.clear();
        self.coordinator.reset();
        self.publisher.reset();
        self.roster_retry.reset();
        self.roster_outstanding = false;
        let generation = self.queue.advance_generation();
        self.dispatch_sender = None;
        self.init_order.clear();
        self.initialized = false;
        self.disconnected = false;
        info!("Session left, next generation is {}", generation);
    }

    /// Runs one cooperative tick: drains inbound messages, advances the
    /// barrier, publishes the local sample and recomputes every render pose.
    pub fn tick(
        &mut self,
        now_ms: u64,
        sample: Option<&LocalSample>,
    ) -> Result<SyncEvents, SyncError> {
        if !self.initialized {
            return Err(SyncError::NotInitialized);
        }

        let mut events = SyncEvents::new();

        for dispatched in self.queue.drain() {
            match dispatched {
                Dispatched::Message {
                    event_name,
                    payload,
                } => self.handle_message(&event_name, &payload, now_ms, &mut events),
                Dispatched::Disconnected => self.handle_disconnect(&mut events),
            }
        }

        if let Some(report) = self.coordinator.check_fallback(&mut self.registry, now_ms) {
            events.push_start(report);
        }

        if let Some(error) = self.poll_roster(now_ms) {
            events.push_error(error);
        }

        if let (Some(sample), false) = (sample, self.disconnected) {
            if let Err(error) = self.publisher.tick(now_ms, sample, &mut self.transport) {
                warn!("Failed to publish local state: {}", error);
                events.push_error(error.into());
            }
        }

        self.registry.compute_render_poses(now_ms);

        Ok(events)
    }

    // Internals

    fn run_stage(&mut self, stage: InitStage, now_ms: u64) -> Result<(), SyncError> {
        match stage {
            InitStage::Dispatch => {
                self.disconnected = false;
                self.dispatch_sender = Some(self.queue.sender());
            }
            InitStage::Registry => {
                if let Some(local_id) = &self.config.local_id {
                    self.registry.set_local_id(local_id.clone());
                }
            }
            InitStage::Coordinator => {
                self.coordinator.reset();
            }
            InitStage::Publisher => {
                self.publisher.resume();
                if let Some(local_id) = &self.config.local_id {
                    self.publisher.set_local_id(local_id.clone());
                }
            }
            InitStage::Subscriptions => {
                let sender = self
                    .dispatch_sender
                    .clone()
                    .ok_or(SyncError::NotInitialized)?;
                for event in EventName::INBOUND {
                    let sender = sender.clone();
                    let event_name = event.as_str();
                    self.transport.subscribe(
                        event_name,
                        Box::new(move |payload: Payload| sender.send(event_name, payload)),
                    );
                }
            }
            InitStage::RosterRequest => {
                self.roster_retry.reset();
                self.roster_outstanding = true;
                if let Some(error) = self.poll_roster(now_ms) {
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    fn handle_message(
        &mut self,
        event_name: &str,
        payload: &Payload,
        now_ms: u64,
        events: &mut SyncEvents,
    ) {
        let message = match InboundMessage::decode(event_name, payload) {
            Ok(message) => message,
            Err(error) => {
                warn!("{}", error);
                events.push_error(error.into());
                return;
            }
        };

        match message {
            InboundMessage::MemberJoined(joined) => {
                let descriptor = joined.descriptor();
                let outcome = self.registry.on_member_joined(
                    joined.id.clone(),
                    descriptor,
                    joined.stats,
                    self.coordinator.is_started(),
                    now_ms,
                );
                if outcome == JoinOutcome::Spawned {
                    events.push_spawn(joined.id);
                    // late join: the roster may list more than we were told
                    self.request_roster(now_ms, events);
                }
            }
            InboundMessage::MemberLeft(left) => {
                if self.registry.on_member_left(&left.id) == Some(LeftOutcome::Despawned) {
                    events.push_despawn(left.id);
                }
            }
            InboundMessage::PoseUpdate(update) => {
                let snapshot = update.to_snapshot(now_ms);
                self.registry.on_snapshot_received(&update.id, snapshot);
            }
            InboundMessage::AnimationChanged(changed) => {
                let outcome = self
                    .registry
                    .on_animation_state_received(&changed.id, &changed.state);
                if outcome == RouteOutcome::Applied {
                    events.push_animation(changed.id, changed.state);
                }
            }
            InboundMessage::LobbyCreated(lobby) => {
                if self.coordinator.on_lobby_created(lobby.wait_ms) {
                    events.push_lobby(lobby.wait_ms);
                }
            }
            InboundMessage::CountdownTick(countdown) => {
                if self.coordinator.on_countdown_tick(countdown.remaining) {
                    events.push_countdown(countdown.remaining);
                }
            }
            InboundMessage::GameStart(start) => {
                let fallback_started = self.coordinator.started_by_fallback();
                match self.coordinator.on_game_start(
                    &mut self.registry,
                    &start.roster,
                    start.your_spawn_slot,
                    now_ms,
                ) {
                    Some(report) => events.push_start(report),
                    None if fallback_started => {
                        // the authority's roster still counts after a local start
                        self.reconcile_roster(start.roster.iter(), now_ms, events);
                    }
                    None => {}
                }
            }
            InboundMessage::RosterSnapshot(roster) => {
                self.apply_roster(roster, now_ms, events);
            }
            InboundMessage::Notice(notice) => {
                if self.registry.on_gameplay_notice(&notice, &mut self.handlers)
                    == NoticeOutcome::Unhandled
                {
                    events.push_gameplay(notice);
                }
            }
        }
    }

    fn handle_disconnect(&mut self, events: &mut SyncEvents) {
        if self.disconnected {
            return;
        }
        warn!(
            "Transport disconnected, freezing {} remote entities",
            self.registry.active_len()
        );
        self.disconnected = true;
        self.registry.freeze_all();
        self.publisher.suspend();
        events.push_disconnection();
    }

    fn apply_roster(&mut self, roster: RosterSnapshot, now_ms: u64, events: &mut SyncEvents) {
        self.roster_retry.succeed();
        self.roster_outstanding = false;

        if self.registry.local_id() != Some(&roster.your_id) {
            self.registry.set_local_id(roster.your_id.clone());
            self.publisher.set_local_id(roster.your_id.clone());
        }
        self.coordinator.set_local_spawn_slot(roster.your_spawn_slot);

        if self.coordinator.is_started() {
            self.reconcile_roster(roster.remote_players(), now_ms, events);
            return;
        }

        for entry in roster.remote_players() {
            if self.registry.is_pending(&entry.id) {
                if !entry.stats.is_null() {
                    self.registry.on_stats_received(&entry.id, entry.stats.clone());
                }
            } else {
                self.registry.on_member_joined(
                    entry.id.clone(),
                    entry.descriptor(),
                    entry.stats.clone(),
                    false,
                    now_ms,
                );
            }
        }
    }

    // Creates roster entries that are not visible yet. Only valid once the
    // barrier has fired.
    fn reconcile_roster<'a>(
        &mut self,
        entries: impl Iterator<Item = &'a RosterEntry>,
        now_ms: u64,
        events: &mut SyncEvents,
    ) {
        for entry in entries {
            if self.registry.is_active(&entry.id) {
                continue;
            }
            let created =
                self.registry
                    .create(entry.id.clone(), entry.descriptor(), entry.stats.clone(), now_ms);
            if created {
                events.push_spawn(entry.id.clone());
            }
        }
    }

    fn request_roster(&mut self, now_ms: u64, events: &mut SyncEvents) {
        if self.roster_outstanding {
            return;
        }
        self.roster_retry.reset();
        self.roster_outstanding = true;
        if let Some(error) = self.poll_roster(now_ms) {
            events.push_error(error);
        }
    }

    fn poll_roster(&mut self, now_ms: u64) -> Option<SyncError> {
        if !self.roster_outstanding {
            return None;
        }

        match self.roster_retry.poll(now_ms) {
            RetryPoll::Attempt(attempt) => {
                debug!("Sending roster-request, attempt {}", attempt);
                emit_message(&mut self.transport, &RosterRequest { attempt })
                    .err()
                    .map(SyncError::from)
            }
            RetryPoll::Wait => None,
            RetryPoll::Exhausted(RetryError::Exhausted { attempts }) => {
                warn!("No roster-snapshot after {} roster-request attempts", attempts);
                self.roster_outstanding = false;
                Some(SyncError::RosterUnavailable { attempts })
            }
            RetryPoll::Settled => {
                self.roster_outstanding = false;
                None
            }
        }
    }
}
