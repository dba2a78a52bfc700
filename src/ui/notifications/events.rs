// SPDX-License-Identifier: MPL-2.0
//! Observer events produced by the coordinator.
//!
//! Events are kept in a memory-bounded ring buffer that evicts the oldest
//! entries when full, and copied to every live subscriber channel.

use super::notification::ToastId;
use super::toast::DismissReason;
use crate::config::defaults::{EVENT_BUFFER_CAPACITY, SUBSCRIBER_CHANNEL_CAPACITY};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::collections::VecDeque;

/// Why a toast was discarded without ever being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// Same title and message as a toast already on screen.
    Duplicate,
    /// Evicted from the full queue by a newer toast.
    QueueOverflow,
    /// No room at the anchor and queueing is disabled.
    QueueDisabled,
    /// Removed from the queue by the caller.
    Cancelled,
}

/// Something observable that happened to a toast or the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    /// Entrance animation completed.
    Shown(ToastId),
    /// Exit animation completed; the toast is destroyed.
    Hidden(ToastId),
    /// The toast started hiding. Emitted once per toast.
    Dismissed { id: ToastId, reason: DismissReason },
    /// The toast was discarded before being shown.
    Dropped { id: ToastId, reason: DropReason },
    /// A queue drain pass ran.
    QueueProcessed { admitted: usize },
    /// The last on-screen toast finished hiding.
    AllHidden,
    /// An action button was triggered.
    ActionTriggered { id: ToastId, index: usize },
    ProgressChanged { id: ToastId, value: i32 },
    TimerPaused(ToastId),
    TimerResumed(ToastId),
    /// A coordinator setting changed; read it back with `configuration()`.
    ConfigChanged,
}

/// A generic circular buffer with fixed capacity.
///
/// When the buffer is full, pushing a new element evicts the oldest one.
/// Elements are stored in chronological order (oldest first).
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    /// Creates a buffer holding at most `capacity` elements (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes an element, evicting the oldest if at capacity.
    pub fn push(&mut self, item: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    /// Returns an iterator over the elements in chronological order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Removes and returns every element, oldest first.
    pub fn drain(&mut self) -> Vec<T> {
        self.data.drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

/// Event sink: ring buffer plus subscriber fan-out.
#[derive(Debug)]
pub(crate) struct EventHub {
    buffer: CircularBuffer<ToastEvent>,
    subscribers: Vec<Sender<ToastEvent>>,
}

impl Default for EventHub {
    fn default() -> Self {
        Self {
            buffer: CircularBuffer::new(EVENT_BUFFER_CAPACITY),
            subscribers: Vec::new(),
        }
    }
}

impl EventHub {
    pub(crate) fn emit(&mut self, event: ToastEvent) {
        tracing::trace!(?event, "toast event");
        self.subscribers
            .retain(|tx| match tx.try_send(event.clone()) {
                Ok(()) | Err(TrySendError::Full(_)) => true,
                Err(TrySendError::Disconnected(_)) => false,
            });
        self.buffer.push(event);
    }

    pub(crate) fn subscribe(&mut self) -> Receiver<ToastEvent> {
        let (tx, rx) = crossbeam_channel::bounded(SUBSCRIBER_CHANNEL_CAPACITY);
        self.subscribers.push(tx);
        rx
    }

    pub(crate) fn drain(&mut self) -> Vec<ToastEvent> {
        self.buffer.drain()
    }

    pub(crate) fn pending(&self) -> impl Iterator<Item = &ToastEvent> {
        self.buffer.iter()
    }
}
