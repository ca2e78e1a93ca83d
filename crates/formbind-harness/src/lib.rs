#![forbid(unsafe_code)]

//! Deterministic test harness for formbind fields.
//!
//! - [`VirtualClock`]: millisecond offsets from a fixed origin.
//! - [`CommitLog`]: records every consumer callback with the virtual time it
//!   fired at.
//! - [`Driver`]: a timer queue plus clock; [`Driver::advance_to`] fires due
//!   timers one deadline at a time so commits are timestamped exactly.
//! - [`TextFixture`]: a mounted text field wired to a [`FormController`] and
//!   a [`CommitLog`].
//!
//! # Example
//!
//! ```
//! use formbind_harness::TextFixture;
//!
//! let mut fx = TextFixture::new("foo", 250);
//! fx.type_at(10, "foobar");
//! fx.advance_to(400);
//! assert_eq!(fx.log.entries(), vec![(260, "foobar".to_string())]);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use formbind_core::FieldDefinition;
use formbind_runtime::{FormController, SyncConfig, TimerQueue};
use formbind_widgets::{FieldView, SyncedField, TextInput};
use web_time::{Duration, Instant};

/// Virtual time measured in whole milliseconds from a fixed origin.
#[derive(Clone, Debug)]
pub struct VirtualClock {
    origin: Instant,
    now_ms: Rc<Cell<u64>>,
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualClock {
    /// Start at t=0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            now_ms: Rc::new(Cell::new(0)),
        }
    }

    /// Instant for `ms` milliseconds after the origin.
    #[must_use]
    pub fn at(&self, ms: u64) -> Instant {
        self.origin + Duration::from_millis(ms)
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Current virtual instant.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.at(self.now_ms())
    }

    /// Milliseconds between the origin and `instant` (rounded down).
    #[must_use]
    pub fn ms_of(&self, instant: Instant) -> u64 {
        let elapsed = instant.saturating_duration_since(self.origin).as_millis();
        u64::try_from(elapsed).unwrap_or(u64::MAX)
    }

    /// Move the clock. Time never goes backwards.
    pub fn set_ms(&self, ms: u64) {
        if ms > self.now_ms.get() {
            self.now_ms.set(ms);
        }
    }
}

/// Recorder for consumer callbacks.
#[derive(Debug)]
pub struct CommitLog<T> {
    clock: VirtualClock,
    entries: Rc<RefCell<Vec<(u64, T)>>>,
}

impl<T> Clone for CommitLog<T> {
    fn clone(&self) -> Self {
        Self {
            clock: self.clock.clone(),
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<T: Clone + 'static> CommitLog<T> {
    /// Create a log stamped by `clock`.
    #[must_use]
    pub fn new(clock: &VirtualClock) -> Self {
        Self {
            clock: clock.clone(),
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A consumer callback appending to this log.
    pub fn sink(&self) -> impl Fn(T) + 'static {
        let log = self.clone();
        move |value| {
            let at = log.clock.now_ms();
            tracing::trace!(at, "commit recorded");
            log.entries.borrow_mut().push((at, value));
        }
    }

    /// All `(time_ms, value)` entries.
    #[must_use]
    pub fn entries(&self) -> Vec<(u64, T)> {
        self.entries.borrow().clone()
    }

    /// Committed values only.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.entries.borrow().iter().map(|(_, v)| v.clone()).collect()
    }

    /// Number of commits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing was committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Timer queue driven by a virtual clock.
#[derive(Clone, Debug, Default)]
pub struct Driver {
    /// Shared virtual clock.
    pub clock: VirtualClock,
    /// Shared timer queue.
    pub timers: TimerQueue,
}

impl Driver {
    /// Fresh clock and queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `ms`, firing each due timer at its own deadline.
    ///
    /// Returns the number of timers fired.
    pub fn advance_to(&self, ms: u64) -> usize {
        let target = self.clock.at(ms);
        let mut fired = 0;
        while let Some(deadline) = self.timers.next_deadline() {
            if deadline > target {
                break;
            }
            self.clock.set_ms(self.clock.ms_of(deadline));
            let n = self.timers.fire_due(deadline);
            if n == 0 {
                break;
            }
            fired += n;
        }
        self.clock.set_ms(ms);
        fired
    }
}

/// A text field mounted against a [`FormController`] with a [`CommitLog`].
pub struct TextFixture {
    /// Clock and timers.
    pub driver: Driver,
    /// The field's controller (shared with the field).
    pub controller: FormController<String>,
    /// Consumer callback log.
    pub log: CommitLog<String>,
    /// The field under test.
    pub field: SyncedField<TextInput, FormController<String>>,
}

impl TextFixture {
    /// Mount a text field with value `initial` and a `window_ms` debounce.
    #[must_use]
    pub fn new(initial: &str, window_ms: u64) -> Self {
        Self::with_definition(initial, window_ms, FieldDefinition::default())
    }

    /// Mount with an explicit definition.
    #[must_use]
    pub fn with_definition(initial: &str, window_ms: u64, definition: FieldDefinition) -> Self {
        let driver = Driver::new();
        let controller = FormController::new("name", initial.to_string());
        let log = CommitLog::new(&driver.clock);
        let field = SyncedField::builder(TextInput::new(), controller.clone())
            .definition(definition)
            .config(SyncConfig::new().debounce_ms(window_ms))
            .build(&driver.timers, log.sink());
        Self {
            driver,
            controller,
            log,
            field,
        }
    }

    /// Advance to `ms`, then deliver a keystroke leaving the input at `text`.
    pub fn type_at(&mut self, ms: u64, text: &str) {
        self.driver.advance_to(ms);
        let now = self.driver.clock.now();
        // Text input never rejects.
        let _ = self.field.input(text, now);
    }

    /// Advance to `ms`, then blur.
    pub fn blur_at(&mut self, ms: u64) -> Option<String> {
        self.driver.advance_to(ms);
        self.field.blur()
    }

    /// Advance to `ms`, then change the controller value externally.
    pub fn external_at(&mut self, ms: u64, value: &str) {
        self.driver.advance_to(ms);
        self.controller.set(value.to_string());
    }

    /// Advance the clock, firing timers.
    pub fn advance_to(&mut self, ms: u64) -> usize {
        self.driver.advance_to(ms)
    }

    /// Render snapshot.
    pub fn view(&self) -> FieldView {
        self.field.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_monotonic() {
        let clock = VirtualClock::new();
        clock.set_ms(50);
        clock.set_ms(20);
        assert_eq!(clock.now_ms(), 50);
        assert_eq!(clock.ms_of(clock.at(123)), 123);
    }

    #[test]
    fn driver_fires_at_deadlines() {
        let driver = Driver::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut handles = Vec::new();
        for at in [30_u64, 10, 20] {
            let s = Rc::clone(&seen);
            let clock = driver.clock.clone();
            handles.push(
                driver
                    .timers
                    .schedule_at(driver.clock.at(at), move || s.borrow_mut().push(clock.now_ms())),
            );
        }
        assert_eq!(driver.advance_to(25), 2);
        assert_eq!(*seen.borrow(), vec![10, 20]);
        assert_eq!(driver.clock.now_ms(), 25);
        assert_eq!(driver.advance_to(100), 1);
        assert_eq!(*seen.borrow(), vec![10, 20, 30]);
    }

    #[test]
    fn log_records_time() {
        let clock = VirtualClock::new();
        let log = CommitLog::new(&clock);
        let sink = log.sink();
        clock.set_ms(7);
        sink("a");
        assert_eq!(log.entries(), vec![(7, "a")]);
        assert_eq!(log.values(), vec!["a"]);
        assert_eq!(log.len(), 1);
    }
}
