#![forbid(unsafe_code)]

//! Debounced synchronization between an authoritative value and a local edit
//! buffer.
//!
//! [`FieldSync`] is the toolkit-independent core of every editable field. It
//! tracks three values:
//!
//! - the **authoritative** value last observed on the controller,
//! - the **local** buffer the user is typing into (what gets rendered),
//! - the **committed** baseline: the last value handed to the consumer that
//!   the controller has not echoed back yet. It only classifies incoming
//!   controller changes; it never suppresses a commit.
//!
//! The state machine never touches a clock or a timer itself. Callers pass
//! `now` into [`FieldSync::edit`] and get back the deadline at which
//! [`FieldSync::elapse`] should run; the widget layer maps that onto a
//! cancelable timer.
//!
//! # State machine
//!
//! ```text
//!            edit                      edit (window restarts)
//!   Idle ───────────▶ Editing ◀─────────────┐
//!    ▲                 │  │ └───────────────┘
//!    │   elapse        │  │ blur
//!    ├─────────────────┘  ▼
//!    │            PendingFlush
//!    └────────────────────┘ (synchronous)
//!
//!   any ── external change ──▶ Idle      any ── destroy ──▶ Destroyed
//! ```
//!
//! # Invariants
//!
//! 1. After an external change, `local == authoritative` and no deadline is
//!    pending.
//! 2. The pending value is only ever a snapshot of `local` taken when the
//!    quiescence window elapsed.
//! 3. A commit is returned for every elapse or blur whose value differs
//!    from the authoritative value, and for no other.
//! 4. `blur` cancels the deadline and decides synchronously.
//! 5. [`FieldSync::local`] is the only value meant for rendering.
//! 6. Once destroyed, every operation is a no-op returning `None`.
//!
//! # Echo handling
//!
//! When the controller's value moves to exactly the committed baseline, the
//! change is the field's own commit coming back, not an external edit. The
//! buffer is kept while an edit is still in flight so keystrokes typed after
//! the commit survive. With no edit in flight the buffer resyncs to the
//! controller.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `elapse` with no deadline | No-op (stale timer) |
//! | Operation after `destroy` | No-op |
//! | Deadline overflows `Instant` | Deadline clamps to `now` |

use web_time::{Duration, Instant};

/// Default quiescence window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Lifecycle state of a synchronized field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncState {
    /// Buffer matches what the field last agreed on; nothing scheduled.
    Idle,
    /// User edited; a debounce deadline is pending.
    Editing,
    /// A blur is being resolved. Only observable from inside `blur`.
    PendingFlush,
    /// Terminal.
    Destroyed,
}

/// Outcome of comparing the controller's value with the last one observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    /// Controller value unchanged.
    Unchanged,
    /// Controller caught up with this field's own commit.
    Echo,
    /// Controller changed for another reason; buffer was reset.
    Overridden,
    /// Field is destroyed; nothing was compared.
    Ignored,
}

/// Synchronization core for one field instance.
#[derive(Clone, Debug)]
pub struct FieldSync<T> {
    authoritative: T,
    local: T,
    pending: Option<T>,
    committed: Option<T>,
    deadline: Option<Instant>,
    window: Duration,
    state: SyncState,
}

impl<T: Clone + PartialEq> FieldSync<T> {
    /// Seed a field from the authoritative value with the default window.
    #[must_use]
    pub fn new(authoritative: T) -> Self {
        Self::with_window(authoritative, DEFAULT_DEBOUNCE)
    }

    /// Seed a field with an explicit quiescence window.
    #[must_use]
    pub fn with_window(authoritative: T, window: Duration) -> Self {
        Self {
            local: authoritative.clone(),
            authoritative,
            pending: None,
            committed: None,
            deadline: None,
            window,
            state: SyncState::Idle,
        }
    }

    /// The local buffer. This is what the user sees.
    #[must_use]
    pub fn local(&self) -> &T {
        &self.local
    }

    /// Last authoritative value observed.
    #[must_use]
    pub fn authoritative(&self) -> &T {
        &self.authoritative
    }

    /// Last debounced snapshot of the buffer.
    #[must_use]
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Last committed value still awaiting its echo.
    #[must_use]
    pub fn committed(&self) -> Option<&T> {
        self.committed.as_ref()
    }

    /// When the current quiescence window ends, if one is running.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Configured quiescence window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Whether the field has been torn down.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.state == SyncState::Destroyed
    }

    /// Whether the buffer differs from the authoritative value.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.local != self.authoritative
    }

    /// Compare the controller's current value with the last one observed.
    ///
    /// Call this on every pass (render, edit, blur, timer). A change that
    /// matches the committed baseline is an [`Observation::Echo`]; any other
    /// change goes through [`FieldSync::external_change`].
    pub fn observe(&mut self, current: &T) -> Observation {
        if self.is_destroyed() {
            return Observation::Ignored;
        }
        if *current == self.authoritative {
            return Observation::Unchanged;
        }
        if self.committed.as_ref() == Some(current) {
            self.authoritative = current.clone();
            self.committed = None;
            if self.deadline.is_none() {
                self.local = current.clone();
                self.state = SyncState::Idle;
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(editing = self.deadline.is_some(), "controller echoed commit");
            return Observation::Echo;
        }
        self.external_change(current.clone());
        Observation::Overridden
    }

    /// The controller's value changed for a reason other than this field.
    ///
    /// Resets the buffer, drops any pending deadline and forgets the
    /// committed baseline. Never produces a commit.
    pub fn external_change(&mut self, value: T) {
        if self.is_destroyed() {
            return;
        }
        self.local = value.clone();
        self.authoritative = value;
        self.pending = None;
        self.committed = None;
        self.deadline = None;
        self.state = SyncState::Idle;
    }

    /// The user changed the input.
    ///
    /// Updates the buffer immediately and restarts the quiescence window.
    /// Returns the new deadline, or `None` once destroyed.
    pub fn edit(&mut self, value: T, now: Instant) -> Option<Instant> {
        if self.is_destroyed() {
            return None;
        }
        self.local = value;
        let deadline = now.checked_add(self.window).unwrap_or(now);
        self.deadline = Some(deadline);
        self.state = SyncState::Editing;
        Some(deadline)
    }

    /// Run [`FieldSync::elapse`] if the deadline has passed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if deadline <= now => self.elapse(),
            _ => None,
        }
    }

    /// The quiescence window elapsed.
    ///
    /// Snapshots the buffer as the pending value and returns it as a commit
    /// if it differs from the authoritative value.
    pub fn elapse(&mut self) -> Option<T> {
        if self.is_destroyed() || self.deadline.take().is_none() {
            return None;
        }
        self.pending = Some(self.local.clone());
        self.state = SyncState::Idle;
        self.commit_if_changed()
    }

    /// The input lost focus: decide immediately, bypassing the window.
    pub fn blur(&mut self) -> Option<T> {
        if self.is_destroyed() {
            return None;
        }
        self.deadline = None;
        self.state = SyncState::PendingFlush;
        let commit = self.commit_if_changed();
        self.state = SyncState::Idle;
        commit
    }

    /// Tear down. Returns `false` if already destroyed.
    pub fn destroy(&mut self) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.deadline = None;
        self.state = SyncState::Destroyed;
        true
    }

    fn commit_if_changed(&mut self) -> Option<T> {
        if self.local == self.authoritative {
            #[cfg(feature = "tracing")]
            tracing::trace!("commit suppressed: buffer matches controller");
            return None;
        }
        self.committed = Some(self.local.clone());
        Some(self.local.clone())
    }
}
