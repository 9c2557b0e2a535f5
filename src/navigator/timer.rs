//! # Clock and deferred tasks
//!
//! Time is plain milliseconds on a monotonic scale. The navigator reads it
//! through the [`Clock`] trait so tests can drive time by hand, and keeps its
//! deferred work in a [`TimerQueue`] that the host loop drains via `tick`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Milliseconds on a monotonic scale.
pub type Millis = u64;

/// Source of monotonic time (allows dependency injection for testing).
pub trait Clock: Send {
    fn now_ms(&self) -> Millis;
}

/// Production clock: milliseconds since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> Millis {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Millis) -> Millis {
        self.now.fetch_add(by, Ordering::SeqCst) + by
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TimerKey {
    due: Millis,
    seq: u64,
}

/// Deferred tasks ordered by due time, then by scheduling order.
///
/// Each task is handed out by [`TimerQueue::pop_due`] at most once. Tasks
/// dropped by [`TimerQueue::cancel_all`] are never handed out.
#[derive(Debug)]
pub struct TimerQueue<T> {
    tasks: BTreeMap<TimerKey, T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Millis, task: T) {
        let key = TimerKey {
            due,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.tasks.insert(key, task);
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.tasks.len();
        self.tasks.clear();
        count
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<T> {
        let id = *self.tasks.keys().next()?;
        if id.due > now {
            return None;
        }
        self.tasks.remove(&id)
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.tasks.keys().next().map(|id| id.due)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
