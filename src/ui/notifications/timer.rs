// SPDX-License-Identifier: MPL-2.0
//! Time source and single-shot timers for the toast coordinator.
//!
//! Everything runs on the UI thread. Timers never fire on their own: the
//! owner pops due entries with [`Timers::pop_due`] from its event loop tick,
//! in deadline order, and treats each deadline as the logical "now" while
//! handling it.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for tests and simulations.
///
/// Clones share the same time, so a test can keep one handle while the
/// coordinator owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Moves time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Moves time forward by `millis` milliseconds.
    pub fn advance_ms(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Deadline-ordered set of single-shot timers carrying a payload `K`.
///
/// Timers sharing a deadline fire in scheduling order.
#[derive(Debug)]
pub struct Timers<K> {
    due: BTreeMap<(Instant, TimerId), K>,
    deadlines: HashMap<TimerId, Instant>,
    next_id: u64,
}

impl<K> Timers<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            due: BTreeMap::new(),
            deadlines: HashMap::new(),
            next_id: 0,
        }
    }

    /// Schedules `payload` to fire at `at`.
    pub fn schedule(&mut self, at: Instant, payload: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.due.insert((at, id), payload);
        self.deadlines.insert(id, at);
        id
    }

    /// Cancels a timer, returning its payload if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> Option<K> {
        let at = self.deadlines.remove(&id)?;
        self.due.remove(&(at, id))
    }

    /// Removes and returns the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerId, Instant, K)> {
        let (&(at, id), _) = self.due.first_key_value()?;
        if at > now {
            return None;
        }
        self.deadlines.remove(&id);
        let payload = self.due.remove(&(at, id))?;
        Some((id, at, payload))
    }

    /// Returns the deadline of a pending timer.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<Instant> {
        self.deadlines.get(&id).copied()
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.due.keys().next().map(|(at, _)| *at)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.due.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.due.is_empty()
    }

    /// Drops every pending timer without firing it.
    pub fn clear(&mut self) {
        self.due.clear();
        self.deadlines.clear();
    }
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self::new()
    }
}
