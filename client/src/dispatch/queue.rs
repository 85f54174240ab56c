//! ## Dispatch queue
//!
//! Transport handlers may run on any thread; everything else runs on the tick
//! thread. The queue is the only place the two meet:
//!
//! ```text
//!   transport thread(s)                         tick thread
//!   ───────────────────                         ───────────
//!   DispatchSender::send ──► Arc<Mutex<VecDeque>> ──► DispatchQueue::drain
//! ```
//!
//! Every envelope carries the session generation of the sender that pushed
//! it. `advance_generation` (called on leave) empties the queue and makes
//! every older sender stale; envelopes from stale senders are dropped.

use std::{
    collections::VecDeque,
    mem,
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
};

use log::{debug, trace};

use cohort_shared::{Payload, SessionGeneration};

/// One unit of work handed from the transport to the tick thread
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatched {
    Message { event_name: String, payload: Payload },
    Disconnected,
}

struct Envelope {
    generation: SessionGeneration,
    dispatched: Dispatched,
}

type SharedQueue = Arc<Mutex<VecDeque<Envelope>>>;

fn lock(queue: &SharedQueue) -> MutexGuard<'_, VecDeque<Envelope>> {
    // a panicking pusher cannot leave a VecDeque half-written
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cloneable, thread-safe handle used by transport callbacks
#[derive(Clone)]
pub struct DispatchSender {
    queue: SharedQueue,
    current: Arc<AtomicU32>,
    generation: SessionGeneration,
}

impl DispatchSender {
    pub fn send(&self, event_name: &str, payload: Payload) {
        self.push(Dispatched::Message {
            event_name: event_name.to_string(),
            payload,
        });
    }

    /// Reports that the transport connection was lost
    pub fn disconnected(&self) {
        self.push(Dispatched::Disconnected);
    }

    pub fn generation(&self) -> SessionGeneration {
        self.generation
    }

    pub fn is_stale(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.generation
    }

    fn push(&self, dispatched: Dispatched) {
        if self.is_stale() {
            trace!(
                "Dropping {:?} from stale session generation {}",
                dispatched,
                self.generation
            );
            return;
        }
        lock(&self.queue).push_back(Envelope {
            generation: self.generation,
            dispatched,
        });
    }
}

pub struct DispatchQueue {
    queue: SharedQueue,
    current: Arc<AtomicU32>,
}

impl Default for DispatchQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchQueue {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            current: Arc::new(AtomicU32::new(0)),
        }
    }

    /// A sender bound to the current generation
    pub fn sender(&self) -> DispatchSender {
        DispatchSender {
            queue: self.queue.clone(),
            current: self.current.clone(),
            generation: self.generation(),
        }
    }

    pub fn generation(&self) -> SessionGeneration {
        self.current.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        lock(&self.queue).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes everything queued so far, in arrival order, minus envelopes
    /// from stale generations.
    pub fn drain(&mut self) -> Vec<Dispatched> {
        let envelopes = mem::take(&mut *lock(&self.queue));
        let generation = self.generation();

        let mut output = Vec::with_capacity(envelopes.len());
        for envelope in envelopes {
            if envelope.generation != generation {
                debug!(
                    "Dropping message from session generation {} (current is {})",
                    envelope.generation, generation
                );
                continue;
            }
            output.push(envelope.dispatched);
        }
        output
    }

    /// Empties the queue and invalidates every existing sender
    pub fn advance_generation(&mut self) -> SessionGeneration {
        let mut queue = lock(&self.queue);
        queue.clear();
        let next = self.current.load(Ordering::Acquire).wrapping_add(1);
        self.current.store(next, Ordering::Release);
        next
    }
}
