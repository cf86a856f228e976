use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread::{self, ThreadId};

use poller_core::Event;
use poller_logging::{poller_debug, poller_trace, poller_warn};
use serde_json::Value;

use crate::decode::{decode_event, DecodeError};

/// Prefix the backend puts in front of every channel name on the transport.
pub const TOPIC_PREFIX: &str = "polled:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    State,
    Data,
    UrlStatus,
    Error,
    Log,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::State,
        Channel::Data,
        Channel::UrlStatus,
        Channel::Error,
        Channel::Log,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Channel::State => "state",
            Channel::Data => "data",
            Channel::UrlStatus => "url-status",
            Channel::Error => "error",
            Channel::Log => "log",
        }
    }

    /// Transport topic, e.g. `polled:url-status`.
    pub fn topic(self) -> String {
        format!("{TOPIC_PREFIX}{}", self.name())
    }

    /// Accepts both the bare name and the prefixed topic.
    pub fn from_name(raw: &str) -> Option<Self> {
        let name = raw.strip_prefix(TOPIC_PREFIX).unwrap_or(raw);
        Channel::ALL
            .into_iter()
            .find(|channel| channel.name() == name)
    }

    pub fn of(event: &Event) -> Self {
        match event {
            Event::State(_) => Channel::State,
            Event::Data(_) => Channel::Data,
            Event::UrlStatus(_) => Channel::UrlStatus,
            Event::Error(_) => Channel::Error,
            Event::Log(_) => Channel::Log,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Handler = Box<dyn FnMut(Event) + Send>;

struct Slot {
    id: u64,
    active: Arc<AtomicBool>,
    handler: Arc<Mutex<Handler>>,
}

#[derive(Default)]
struct Slots {
    next_id: u64,
    by_channel: HashMap<Channel, Vec<Slot>>,
}

/// Events raised from inside a handler, per delivering thread.
type Pending = HashMap<ThreadId, VecDeque<(Channel, Event)>>;

/// Named subscription points over the backend's push notifications.
///
/// Delivery on one channel follows dispatch order; there is no ordering
/// between channels and no deduplication. A handler may publish or dispatch
/// again: the nested event is queued and delivered once the current
/// delivery has finished.
#[derive(Clone, Default)]
pub struct EventChannels {
    slots: Arc<Mutex<Slots>>,
    pending: Arc<Mutex<Pending>>,
}

impl EventChannels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, channel: Channel, handler: F) -> Subscription
    where
        F: FnMut(Event) + Send + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let mut slots = lock(&self.slots);
        slots.next_id += 1;
        let id = slots.next_id;
        slots.by_channel.entry(channel).or_default().push(Slot {
            id,
            active: active.clone(),
            handler: Arc::new(Mutex::new(Box::new(handler))),
        });
        poller_debug!("Subscribed id={} channel={}", id, channel);

        Subscription {
            channel,
            id,
            active,
            slots: Arc::downgrade(&self.slots),
        }
    }

    /// Decodes a raw transport frame and delivers it. Returns how many
    /// handlers saw the event; payloads that fail validation reach none.
    /// Called from inside a handler, the event is queued and 0 is returned.
    pub fn dispatch(&self, topic: &str, payload: Value) -> Result<usize, DecodeError> {
        let Some(channel) = Channel::from_name(topic) else {
            poller_warn!("Dropping payload on unknown topic {:?}", topic);
            return Err(DecodeError::UnknownChannel(topic.to_string()));
        };
        match decode_event(channel, payload) {
            Ok(event) => Ok(self.deliver(channel, event)),
            Err(err) => {
                poller_warn!("Dropping payload on {}: {}", channel, err);
                Err(err)
            }
        }
    }

    /// Delivers an already-typed event on its own channel.
    pub fn publish(&self, event: Event) -> usize {
        self.deliver(Channel::of(&event), event)
    }

    pub fn subscriber_count(&self, channel: Channel) -> usize {
        lock(&self.slots)
            .by_channel
            .get(&channel)
            .map_or(0, Vec::len)
    }

    fn deliver(&self, channel: Channel, event: Event) -> usize {
        let current = thread::current().id();
        {
            let mut pending = lock(&self.pending);
            if let Some(queue) = pending.get_mut(&current) {
                poller_trace!("Queued nested {} event", channel);
                queue.push_back((channel, event));
                return 0;
            }
            pending.insert(current, VecDeque::new());
        }
        let _draining = Draining {
            pending: &self.pending,
            thread: current,
        };

        let delivered = self.deliver_now(channel, event);
        loop {
            let next = lock(&self.pending)
                .get_mut(&current)
                .and_then(VecDeque::pop_front);
            match next {
                Some((channel, event)) => {
                    self.deliver_now(channel, event);
                }
                None => break,
            }
        }
        delivered
    }

    fn deliver_now(&self, channel: Channel, event: Event) -> usize {
        // Handlers run without the slot table locked so they may (un)subscribe.
        let targets: Vec<(Arc<AtomicBool>, Arc<Mutex<Handler>>)> = lock(&self.slots)
            .by_channel
            .get(&channel)
            .map(|slots| {
                slots
                    .iter()
                    .map(|slot| (slot.active.clone(), slot.handler.clone()))
                    .collect()
            })
            .unwrap_or_default();

        let mut delivered = 0;
        for (active, handler) in targets {
            if !active.load(Ordering::Acquire) {
                continue;
            }
            let mut guard = lock(&handler);
            // Unsubscribed while an earlier handler ran.
            if !active.load(Ordering::Acquire) {
                continue;
            }
            let callback: &mut Handler = &mut guard;
            callback(event.clone());
            delivered += 1;
        }
        poller_trace!("Delivered {} event to {} handler(s)", channel, delivered);
        delivered
    }
}

/// Marks a thread as delivering; cleared even if a handler panics.
struct Draining<'a> {
    pending: &'a Mutex<Pending>,
    thread: ThreadId,
}

impl Drop for Draining<'_> {
    fn drop(&mut self) {
        lock(self.pending).remove(&self.thread);
    }
}

/// Handle of one registered handler. Unsubscribes on drop.
pub struct Subscription {
    channel: Channel,
    id: u64,
    active: Arc<AtomicBool>,
    slots: Weak<Mutex<Slots>>,
}

impl Subscription {
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Stops all further deliveries to this handler. Safe to call repeatedly.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(slots) = self.slots.upgrade() {
            let mut slots = lock(&slots);
            if let Some(list) = slots.by_channel.get_mut(&self.channel) {
                list.retain(|slot| slot.id != self.id);
            }
        }
        poller_debug!("Unsubscribed id={} channel={}", self.id, self.channel);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
