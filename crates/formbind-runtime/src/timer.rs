#![forbid(unsafe_code)]

//! Cancelable single-shot timers for a cooperative event loop.
//!
//! A [`TimerQueue`] holds callbacks ordered by deadline. The host loop calls
//! [`TimerQueue::fire_due`] with the current time (and can sleep until
//! [`TimerQueue::next_deadline`]). Scheduling returns a [`TimerHandle`];
//! dropping the handle cancels the timer, so a component that owns its handle
//! can never be called back after it is gone, whatever path tore it down.
//!
//! # Invariants
//!
//! 1. Due timers fire in deadline order; equal deadlines fire in scheduling
//!    order.
//! 2. A cancelled (or dropped) timer never fires.
//! 3. Each timer fires at most once.
//! 4. No `RefCell` borrow is held while a callback runs; callbacks may
//!    schedule or cancel timers on the same queue.
//! 5. Timers scheduled from inside `fire_due` wait for the next call, so a
//!    callback that reschedules itself at `now` cannot spin the loop.
//!
//! # Example
//!
//! ```
//! use formbind_runtime::timer::TimerQueue;
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use web_time::{Duration, Instant};
//!
//! let queue = TimerQueue::new();
//! let fired = Rc::new(Cell::new(false));
//! let f = Rc::clone(&fired);
//! let t0 = Instant::now();
//! let _handle = queue.schedule_at(t0 + Duration::from_millis(250), move || f.set(true));
//!
//! assert_eq!(queue.fire_due(t0 + Duration::from_millis(100)), 0);
//! assert_eq!(queue.fire_due(t0 + Duration::from_millis(250)), 1);
//! assert!(fired.get());
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct TimerKey {
    deadline: Instant,
    seq: u64,
}

#[derive(Default)]
struct QueueInner {
    entries: BTreeMap<TimerKey, Box<dyn FnOnce()>>,
    next_seq: u64,
}

/// Deadline-ordered queue of single-shot callbacks.
///
/// Cloning shares the queue.
#[derive(Clone, Default)]
pub struct TimerQueue {
    inner: Rc<RefCell<QueueInner>>,
}

impl TimerQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `callback` to run at `deadline`.
    #[must_use = "dropping the handle cancels the timer"]
    pub fn schedule_at(&self, deadline: Instant, callback: impl FnOnce() + 'static) -> TimerHandle {
        let key = {
            let mut inner = self.inner.borrow_mut();
            let key = TimerKey {
                deadline,
                seq: inner.next_seq,
            };
            inner.next_seq += 1;
            inner.entries.insert(key, Box::new(callback));
            key
        };
        tracing::trace!(seq = key.seq, "timer scheduled");
        TimerHandle {
            key,
            queue: Rc::downgrade(&self.inner),
        }
    }

    /// Schedule `callback` to run `delay` after `now`.
    #[must_use = "dropping the handle cancels the timer"]
    pub fn schedule_after(
        &self,
        now: Instant,
        delay: Duration,
        callback: impl FnOnce() + 'static,
    ) -> TimerHandle {
        let deadline = now.checked_add(delay).unwrap_or(now);
        self.schedule_at(deadline, callback)
    }

    /// Run every timer whose deadline is at or before `now`.
    ///
    /// Returns the number of callbacks run.
    pub fn fire_due(&self, now: Instant) -> usize {
        let horizon = self.inner.borrow().next_seq;
        let mut fired = 0;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let key = inner
                    .entries
                    .keys()
                    .find(|key| key.seq < horizon)
                    .copied()
                    .filter(|key| key.deadline <= now);
                key.and_then(|key| inner.entries.remove(&key).map(|cb| (key, cb)))
            };
            let Some((key, callback)) = next else {
                break;
            };
            tracing::trace!(seq = key.seq, "timer fired");
            callback();
            fired += 1;
        }
        fired
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner
            .borrow()
            .entries
            .keys()
            .next()
            .map(|key| key.deadline)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }
}

impl std::fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("pending", &self.len())
            .field("next_deadline", &self.next_deadline())
            .finish()
    }
}

/// RAII registration of one scheduled timer.
///
/// Dropping the handle cancels the timer if it has not fired yet.
#[must_use = "dropping the handle cancels the timer"]
pub struct TimerHandle {
    key: TimerKey,
    queue: Weak<RefCell<QueueInner>>,
}

impl TimerHandle {
    /// Deadline this timer was scheduled for.
    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.key.deadline
    }

    /// Whether the timer is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.queue
            .upgrade()
            .is_some_and(|queue| queue.borrow().entries.contains_key(&self.key))
    }

    /// Cancel the timer. Returns `true` if it was still pending.
    pub fn cancel(&mut self) -> bool {
        let Some(queue) = self.queue.upgrade() else {
            return false;
        };
        let removed = queue.borrow_mut().entries.remove(&self.key).is_some();
        if removed {
            tracing::trace!(seq = self.key.seq, "timer cancelled");
        }
        removed
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("deadline", &self.key.deadline)
            .field("pending", &self.is_pending())
            .finish()
    }
}
