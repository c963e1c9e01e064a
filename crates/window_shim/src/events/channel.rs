//! Bounded event channel between the native pump and application threads
//!
//! The channel is the only hand-off point between the thread running the OS
//! message pump and the threads consuming events. It is bounded: when full,
//! publishing blocks the pump until a consumer drains a slot. Events are never
//! dropped, coalesced or reordered.
//!
//! A single process-wide instance is created on first use through
//! [`EventChannel::global`] and lives until the process exits. Write access is
//! restricted to [`EventPublisher`], which only this crate can construct and
//! hands to the native translation layer; applications read through
//! [`EventReceiver`].

use crossbeam_channel::{Receiver, Sender};
use std::sync::OnceLock;

use super::Event;

/// Capacity of the process-wide channel
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

static GLOBAL_CHANNEL: OnceLock<EventChannel> = OnceLock::new();

/// Bounded FIFO of [`Event`]s
#[derive(Debug, Clone)]
pub struct EventChannel {
    sender: Sender<Event>,
    receiver: Receiver<Event>,
}

impl EventChannel {
    /// The process-wide channel, created on first call
    pub fn global() -> &'static Self {
        GLOBAL_CHANNEL.get_or_init(|| {
            log::debug!("Creating global event channel (capacity {})", EVENT_CHANNEL_CAPACITY);
            Self::with_capacity(EVENT_CHANNEL_CAPACITY)
        })
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        Self { sender, receiver }
    }

    pub(crate) fn publisher(&self) -> EventPublisher {
        EventPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Read-only handle for consumers
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }
}

/// Write end of the channel, held by the native translation layer
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: Sender<Event>,
}

impl EventPublisher {
    /// Enqueue an event, blocking while the channel is full
    pub fn publish(&self, event: Event) {
        log::trace!("publish {:?}", event);
        // The channel owns a receiver for its whole lifetime, so this only
        // fails if the channel itself has been dropped.
        if let Err(err) = self.sender.send(event) {
            log::error!("Event channel disconnected, dropping {:?}", err.into_inner());
        }
    }
}

/// Read end of the channel
///
/// Cloneable; every clone reads from the same queue, so each event is seen by
/// exactly one consumer.
#[derive(Debug, Clone)]
pub struct EventReceiver {
    receiver: Receiver<Event>,
}

impl EventReceiver {
    /// Wait for the next event
    ///
    /// Returns `None` only if the channel has been torn down.
    pub fn recv_blocking(&self) -> Option<Event> {
        self.receiver.recv().ok()
    }

    /// Take the next event if one is queued
    pub fn try_recv(&self) -> Option<Event> {
        self.receiver.try_recv().ok()
    }

    /// Iterate over every queued event without blocking
    ///
    /// The iterator ends as soon as the queue reports empty, which is the
    /// point where a frame loop goes off to render before checking again.
    pub fn drain(&self) -> impl Iterator<Item = Event> + '_ {
        self.receiver.try_iter()
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Maximum number of queued events before publishers block
    pub fn capacity(&self) -> usize {
        self.receiver.capacity().unwrap_or(usize::MAX)
    }
}
