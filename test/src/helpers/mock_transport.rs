use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use cohort_client::TransportChannel;
use cohort_shared::Payload;

type Handler = Box<dyn FnMut(Payload) + Send>;

#[derive(Default)]
struct MockState {
    handlers: HashMap<String, Handler>,
    emitted: Vec<(String, Payload)>,
}

/// In-memory transport. Clones share state, so a test keeps one clone to
/// deliver inbound messages and inspect what the session emitted.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Invokes the handler subscribed to `event_name`. Returns false if
    /// nothing is subscribed.
    pub fn deliver(&self, event_name: &str, payload: Payload) -> bool {
        match self.state().handlers.get_mut(event_name) {
            Some(handler) => {
                handler(payload);
                true
            }
            None => false,
        }
    }

    pub fn is_subscribed(&self, event_name: &str) -> bool {
        self.state().handlers.contains_key(event_name)
    }

    pub fn subscription_count(&self) -> usize {
        self.state().handlers.len()
    }

    pub fn emitted(&self) -> Vec<(String, Payload)> {
        self.state().emitted.clone()
    }

    /// Payloads emitted under `event_name`, oldest first
    pub fn emitted_named(&self, event_name: &str) -> Vec<Payload> {
        self.state()
            .emitted
            .iter()
            .filter(|(name, _)| name == event_name)
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    pub fn clear_emitted(&self) {
        self.state().emitted.clear();
    }
}

impl TransportChannel for MockTransport {
    fn subscribe(&mut self, event_name: &str, handler: Box<dyn FnMut(Payload) + Send>) {
        self.state().handlers.insert(event_name.to_string(), handler);
    }

    fn emit(&mut self, event_name: &str, payload: Payload) {
        self.state().emitted.push((event_name.to_string(), payload));
    }
}
