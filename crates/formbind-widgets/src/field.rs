#![forbid(unsafe_code)]

//! The synchronized editable field.
//!
//! [`SyncedField`] owns a [`FieldSync`] core and maps its deadlines onto a
//! [`TimerQueue`]. The host drives it with input events:
//!
//! | Host event | Method |
//! |------------|--------|
//! | keystroke / change | [`SyncedField::input`] or [`SyncedField::edit`] |
//! | clear affordance | [`SyncedField::clear`] |
//! | focus lost | [`SyncedField::blur`] |
//! | render pass | [`SyncedField::view`] (or [`SyncedField::sync`]) |
//! | unmount | [`SyncedField::destroy`] or drop |
//!
//! and by firing the shared timer queue from its event loop.
//!
//! # Invariants
//!
//! 1. Every entry point first compares the controller's value with the last
//!    one observed, so an external change always resets the buffer before the
//!    event is applied.
//! 2. At most one debounce timer is registered per field; scheduling a new
//!    one drops (and so cancels) the previous handle.
//! 3. The consumer callback runs with no internal borrow held. It may read
//!    the field or write the controller.
//! 4. After destroy (or drop) no callback runs: the timer handle is gone and
//!    the core refuses every event.
//! 5. When the controller can notify ([`Controller::watch`]), an external
//!    change resets the buffer as soon as it happens.
//! 6. For adapters that keep raw text, the view shows exactly what was typed
//!    until the buffer is replaced from outside.
//!
//! # Example
//!
//! ```
//! use formbind_runtime::{FormController, TimerQueue};
//! use formbind_widgets::{SyncedField, TextInput};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use web_time::{Duration, Instant};
//!
//! let timers = TimerQueue::new();
//! let controller = FormController::new("name", "foo".to_string());
//! let commits = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&commits);
//! let field = SyncedField::new(TextInput::new(), controller.clone(), &timers, move |v| {
//!     sink.borrow_mut().push(v)
//! });
//!
//! let t0 = Instant::now();
//! field.input("foobar", t0).unwrap();
//! assert_eq!(field.view().text, "foobar");
//! timers.fire_due(t0 + Duration::from_millis(250));
//! assert_eq!(*commits.borrow(), vec!["foobar".to_string()]);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use formbind_core::{
    Controller, ControllerWatch, FieldDefinition, FieldError, FieldId, FieldSync, Observation,
    SyncState,
};
use formbind_runtime::{SyncConfig, TimerHandle, TimerQueue};
use web_time::Instant;

use crate::input::{BooleanInput, InputAdapter};
use crate::view::FieldView;

type CommitFn<V> = Rc<dyn Fn(V)>;

struct FieldInner<A: InputAdapter, C> {
    id: FieldId,
    adapter: A,
    controller: C,
    definition: FieldDefinition,
    config: SyncConfig,
    sync: FieldSync<A::Value>,
    draft: Option<String>,
    seen_version: Option<u64>,
    timers: TimerQueue,
    timer: Option<TimerHandle>,
    on_commit: CommitFn<A::Value>,
    watch: Option<ControllerWatch>,
}

impl<A, C> FieldInner<A, C>
where
    A: InputAdapter,
    C: Controller<A::Value>,
{
    /// Compare-on-render step.
    fn observe_controller(&mut self) -> Observation {
        if self.sync.is_destroyed() {
            return Observation::Ignored;
        }
        let version = self.controller.version();
        if version.is_some() && version == self.seen_version {
            return Observation::Unchanged;
        }
        self.seen_version = version;
        let current = self.controller.value();
        let observation = self.sync.observe(&current);
        match observation {
            Observation::Overridden => {
                self.timer = None;
                self.draft = None;
                tracing::debug!(
                    field = %self.id,
                    name = self.controller.name(),
                    "external change reset buffer"
                );
            }
            Observation::Echo => {
                if self.sync.deadline().is_none() {
                    self.timer = None;
                    self.drop_stale_draft();
                }
                tracing::debug!(field = %self.id, "commit echoed by controller");
            }
            Observation::Unchanged | Observation::Ignored => {}
        }
        observation
    }

    /// Forget raw text that no longer spells the buffer.
    fn drop_stale_draft(&mut self) {
        let matches = self
            .draft
            .as_deref()
            .is_some_and(|raw| self.adapter.parse(raw).as_ref() == Ok(self.sync.local()));
        if !matches {
            self.draft = None;
        }
    }

    fn commit(&self, value: &A::Value, trigger: &'static str) -> CommitFn<A::Value> {
        tracing::debug!(
            field = %self.id,
            name = self.controller.name(),
            trigger,
            value = ?value,
            "commit"
        );
        Rc::clone(&self.on_commit)
    }

    fn view(&self) -> FieldView {
        let local = self.sync.local();
        let name = self.controller.name().to_string();
        let text = self
            .draft
            .clone()
            .unwrap_or_else(|| self.adapter.display(local));
        let empty = self.adapter.is_empty(local) && text.is_empty();
        FieldView {
            id: self.id.to_string(),
            aria_label: format!("{}-field-{name}", A::KIND),
            name,
            kind: A::KIND,
            label: self.definition.label.clone(),
            description: self.definition.description.clone(),
            placeholder: self.definition.placeholder.clone(),
            type_hint: self.definition.type_hint.clone(),
            text,
            error: self.controller.error(),
            required: self.definition.required,
            show_clear: !self.definition.required && self.adapter.clearable() && !empty,
            state: self.sync.state(),
        }
    }
}

/// Builder for a [`SyncedField`] with non-default definition or config.
pub struct FieldBuilder<A, C> {
    adapter: A,
    controller: C,
    definition: FieldDefinition,
    config: SyncConfig,
}

impl<A, C> FieldBuilder<A, C>
where
    A: InputAdapter + 'static,
    C: Controller<A::Value> + 'static,
{
    /// Start from an adapter and a controller.
    #[must_use]
    pub fn new(adapter: A, controller: C) -> Self {
        Self {
            adapter,
            controller,
            definition: FieldDefinition::default(),
            config: SyncConfig::default(),
        }
    }

    /// Set the rendering definition.
    #[must_use]
    pub fn definition(mut self, definition: FieldDefinition) -> Self {
        self.definition = definition;
        self
    }

    /// Set the synchronization config.
    #[must_use]
    pub fn config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Mount the field. The buffer is seeded from the controller.
    pub fn build(
        self,
        timers: &TimerQueue,
        on_commit: impl Fn(A::Value) + 'static,
    ) -> SyncedField<A, C> {
        let id = FieldId::next();
        let seen_version = self.controller.version();
        let sync = FieldSync::with_window(self.controller.value(), self.config.debounce);
        tracing::debug!(
            field = %id,
            name = self.controller.name(),
            kind = %A::KIND,
            "field mounted"
        );
        let field = SyncedField {
            inner: Rc::new(RefCell::new(FieldInner {
                id,
                adapter: self.adapter,
                controller: self.controller,
                definition: self.definition,
                config: self.config,
                sync,
                seen_version,
                timers: timers.clone(),
                timer: None,
                on_commit: Rc::new(on_commit),
                watch: None,
                draft: None,
            })),
        };
        let weak = Rc::downgrade(&field.inner);
        let watch = field.inner.borrow().controller.watch(Rc::new(move || {
            SyncedField::<A, C>::controller_changed(&weak);
        }));
        field.inner.borrow_mut().watch = watch;
        field
    }
}

/// An editable field kept in sync with its controller.
pub struct SyncedField<A: InputAdapter, C> {
    inner: Rc<RefCell<FieldInner<A, C>>>,
}

impl<A, C> SyncedField<A, C>
where
    A: InputAdapter + 'static,
    C: Controller<A::Value> + 'static,
{
    /// Mount a field with the default definition and config.
    pub fn new(
        adapter: A,
        controller: C,
        timers: &TimerQueue,
        on_commit: impl Fn(A::Value) + 'static,
    ) -> Self {
        FieldBuilder::new(adapter, controller).build(timers, on_commit)
    }

    /// Start a builder.
    #[must_use]
    pub fn builder(adapter: A, controller: C) -> FieldBuilder<A, C> {
        FieldBuilder::new(adapter, controller)
    }

    /// Unique element id.
    #[must_use]
    pub fn id(&self) -> FieldId {
        self.inner.borrow().id
    }

    /// Compare the controller's value with the last one observed and
    /// resynchronize the buffer if it changed externally.
    pub fn sync(&self) -> Observation {
        self.inner.borrow_mut().observe_controller()
    }

    /// Handle raw input from the toolkit.
    ///
    /// Partial input (see [`InputAdapter::is_partial`]) is shown and restarts
    /// the window but keeps the last complete value. Rejected input leaves
    /// the buffer and the timer untouched.
    pub fn input(&self, raw: &str, now: Instant) -> Result<(), FieldError> {
        let (parsed, keeps_raw, partial) = {
            let inner = self.inner.borrow();
            (
                inner.adapter.parse(raw),
                inner.adapter.keeps_raw_text(),
                inner.adapter.is_partial(raw),
            )
        };
        let draft = keeps_raw.then(|| raw.to_string());
        match parsed {
            Ok(value) => {
                self.apply_edit(Some(value), draft, now);
                Ok(())
            }
            Err(_) if partial => {
                self.apply_edit(None, Some(raw.to_string()), now);
                Ok(())
            }
            Err(err) => {
                tracing::trace!(field = %self.id(), error = %err, "input rejected");
                Err(err)
            }
        }
    }

    /// Replace the buffer with an already typed value and restart the
    /// quiescence window.
    pub fn edit(&self, value: A::Value, now: Instant) {
        self.apply_edit(Some(value), None, now);
    }

    /// `None` re-applies the current buffer.
    fn apply_edit(&self, value: Option<A::Value>, draft: Option<String>, now: Instant) {
        let mut inner = self.inner.borrow_mut();
        inner.observe_controller();
        let value = value.unwrap_or_else(|| inner.sync.local().clone());
        let Some(deadline) = inner.sync.edit(value, now) else {
            return;
        };
        inner.draft = draft;
        let weak = Rc::downgrade(&self.inner);
        let handle = inner
            .timers
            .schedule_at(deadline, move || Self::debounce_elapsed(&weak));
        // Replacing the handle cancels the previous window.
        inner.timer = Some(handle);
        tracing::trace!(field = %inner.id, "edit");
    }

    /// Clear affordance: empties the buffer without committing. The commit
    /// follows the normal debounce or blur path.
    pub fn clear(&self, now: Instant) {
        let cleared = self.inner.borrow().adapter.cleared();
        self.edit(cleared, now);
    }

    /// The input lost focus. Commits the buffer immediately if it differs
    /// from the controller (when flush-on-blur is enabled).
    ///
    /// Returns the committed value, if any.
    pub fn blur(&self) -> Option<A::Value> {
        let (value, on_commit) = {
            let mut inner = self.inner.borrow_mut();
            inner.observe_controller();
            if !inner.config.flush_on_blur {
                return None;
            }
            inner.timer = None;
            let commit = inner.sync.blur();
            inner.drop_stale_draft();
            let value = commit?;
            let on_commit = inner.commit(&value, "blur");
            (value, on_commit)
        };
        on_commit(value.clone());
        Some(value)
    }

    /// Tear the field down. No callback fires afterwards.
    pub fn destroy(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.sync.destroy() {
            inner.timer = None;
            inner.watch = None;
            tracing::debug!(field = %inner.id, "field destroyed");
        }
    }

    /// Snapshot for rendering. Runs the compare-on-render step first.
    pub fn view(&self) -> FieldView {
        let mut inner = self.inner.borrow_mut();
        inner.observe_controller();
        inner.view()
    }

    /// The local buffer.
    #[must_use]
    pub fn value(&self) -> A::Value {
        self.inner.borrow().sync.local().clone()
    }

    /// The controller value last observed.
    #[must_use]
    pub fn authoritative(&self) -> A::Value {
        self.inner.borrow().sync.authoritative().clone()
    }

    /// Current synchronization state.
    #[must_use]
    pub fn state(&self) -> SyncState {
        self.inner.borrow().sync.state()
    }

    /// Whether the buffer differs from the controller value last observed.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.inner.borrow().sync.is_dirty()
    }

    /// When the pending debounce fires, if one is pending.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        let inner = self.inner.borrow();
        inner
            .timer
            .as_ref()
            .filter(|handle| handle.is_pending())
            .map(TimerHandle::deadline)
    }

    fn controller_changed(weak: &Weak<RefCell<FieldInner<A, C>>>) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        // A pass already in progress compares on its own.
        if let Ok(mut inner) = inner.try_borrow_mut() {
            inner.observe_controller();
        }
    }

    fn debounce_elapsed(weak: &Weak<RefCell<FieldInner<A, C>>>) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let (value, on_commit) = {
            let mut inner = inner.borrow_mut();
            inner.timer = None;
            inner.observe_controller();
            let Some(value) = inner.sync.elapse() else {
                return;
            };
            let on_commit = inner.commit(&value, "debounce");
            (value, on_commit)
        };
        on_commit(value);
    }
}

impl<C> SyncedField<BooleanInput, C>
where
    C: Controller<bool> + 'static,
{
    /// Flip a boolean field.
    pub fn toggle(&self, now: Instant) {
        let next = !self.value();
        self.edit(next, now);
    }
}

impl<A: InputAdapter, C> Drop for SyncedField<A, C> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut()
            && inner.sync.destroy()
        {
            inner.timer = None;
            inner.watch = None;
            tracing::trace!(field = %inner.id, "field dropped");
        }
    }
}

impl<A: InputAdapter, C> std::fmt::Debug for SyncedField<A, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SyncedField")
            .field("id", &inner.id)
            .field("kind", &A::KIND)
            .field("local", inner.sync.local())
            .field("state", &inner.sync.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Choice, ChoiceInput, NumberInput, TextInput};
    use formbind_runtime::FormController;
    use web_time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    type Log<T> = Rc<RefCell<Vec<T>>>;

    fn text_field(
        initial: &str,
    ) -> (
        SyncedField<TextInput, FormController<String>>,
        FormController<String>,
        TimerQueue,
        Log<String>,
    ) {
        let timers = TimerQueue::new();
        let controller = FormController::new("name", initial.to_string());
        let log: Log<String> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let field = SyncedField::new(TextInput::new(), controller.clone(), &timers, move |v| {
            sink.borrow_mut().push(v);
        });
        (field, controller, timers, log)
    }

    #[test]
    fn mounts_from_controller() {
        let (field, _c, _t, _log) = text_field("foo");
        assert_eq!(field.value(), "foo");
        assert_eq!(field.state(), SyncState::Idle);
        let view = field.view();
        assert_eq!(view.text, "foo");
        assert_eq!(view.aria_label, "text-field-name");
        assert_eq!(view.id, field.id().to_string());
    }

    #[test]
    fn debounced_commit() {
        let (field, _c, timers, log) = text_field("foo");
        let t0 = Instant::now();
        field.input("foob", t0 + ms(10)).unwrap();
        field.input("fooba", t0 + ms(40)).unwrap();
        field.input("foobar", t0 + ms(90)).unwrap();
        assert_eq!(field.deadline(), Some(t0 + ms(340)));
        assert_eq!(timers.len(), 1);

        timers.fire_due(t0 + ms(339));
        assert!(log.borrow().is_empty());
        timers.fire_due(t0 + ms(340));
        assert_eq!(*log.borrow(), vec!["foobar".to_string()]);
        assert!(timers.is_empty());
    }

    #[test]
    fn blur_flushes_and_cancels_timer() {
        let (field, _c, timers, log) = text_field("foo");
        let t0 = Instant::now();
        field.input("fooba", t0 + ms(90)).unwrap();
        assert_eq!(field.blur(), Some("fooba".to_string()));
        assert!(timers.is_empty());
        timers.fire_due(t0 + ms(1000));
        assert_eq!(*log.borrow(), vec!["fooba".to_string()]);
    }

    #[test]
    fn blur_disabled_by_config() {
        let timers = TimerQueue::new();
        let controller = FormController::new("name", String::new());
        let log: Log<String> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let field = SyncedField::builder(TextInput::new(), controller)
            .config(SyncConfig::new().flush_on_blur(false).debounce_ms(100))
            .build(&timers, move |v| sink.borrow_mut().push(v));
        let t0 = Instant::now();
        field.input("x", t0).unwrap();
        assert_eq!(field.blur(), None);
        assert_eq!(timers.len(), 1);
        timers.fire_due(t0 + ms(100));
        assert_eq!(*log.borrow(), vec!["x".to_string()]);
    }

    #[test]
    fn external_reset_discards_pending_edit() {
        let (field, controller, timers, log) = text_field("foo");
        let t0 = Instant::now();
        field.input("x", t0 + ms(10)).unwrap();
        controller.set("bar".to_string());
        assert_eq!(field.view().text, "bar");
        assert!(timers.is_empty());
        timers.fire_due(t0 + ms(300));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn external_reset_applies_on_notification() {
        let (field, controller, timers, log) = text_field("foo");
        let t0 = Instant::now();
        field.input("x", t0).unwrap();
        controller.reset_to("bar".to_string());
        // No render in between: the watch already reset the buffer.
        assert_eq!(field.value(), "bar");
        assert!(timers.is_empty());
        timers.fire_due(t0 + ms(250));
        assert!(log.borrow().is_empty());
    }

    /// Controller with neither versions nor notifications.
    struct Plain {
        value: RefCell<String>,
    }

    impl Controller<String> for Plain {
        fn value(&self) -> String {
            self.value.borrow().clone()
        }
        fn error(&self) -> Option<String> {
            None
        }
        fn name(&self) -> &str {
            "plain"
        }
        fn set_value(&self, value: String) {
            *self.value.borrow_mut() = value;
        }
    }

    #[test]
    fn external_reset_seen_by_timer_pass_without_watch() {
        let timers = TimerQueue::new();
        let controller = Rc::new(Plain {
            value: RefCell::new("foo".to_string()),
        });
        let log: Log<String> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let field = SyncedField::new(TextInput::new(), Rc::clone(&controller), &timers, move |v| {
            sink.borrow_mut().push(v);
        });
        let t0 = Instant::now();
        field.input("x", t0).unwrap();
        controller.set_value("bar".to_string());
        assert_eq!(field.value(), "x");
        // The timer pass compares first and finds the reset.
        timers.fire_due(t0 + ms(250));
        assert!(log.borrow().is_empty());
        assert_eq!(field.value(), "bar");
    }

    #[test]
    fn consumer_writing_controller_is_an_echo() {
        let timers = TimerQueue::new();
        let controller = FormController::new("name", "foo".to_string());
        let writer = controller.clone();
        let field = SyncedField::new(TextInput::new(), controller.clone(), &timers, move |v| {
            writer.set(v);
        });
        let t0 = Instant::now();
        field.input("foob", t0).unwrap();
        timers.fire_due(t0 + ms(250));
        assert_eq!(controller.get(), "foob");

        field.input("fooba", t0 + ms(260)).unwrap();
        assert_eq!(field.sync(), Observation::Unchanged);
        assert_eq!(field.value(), "fooba");
        timers.fire_due(t0 + ms(510));
        assert_eq!(controller.get(), "fooba");
        assert_eq!(field.view().text, "fooba");
    }

    #[test]
    fn echo_arriving_mid_edit_keeps_keystrokes() {
        let (field, controller, timers, log) = text_field("foo");
        let t0 = Instant::now();
        field.input("foob", t0).unwrap();
        timers.fire_due(t0 + ms(250));
        field.input("fooba", t0 + ms(260)).unwrap();
        // Persisted value arrives late.
        controller.set("foob".to_string());
        assert_eq!(field.sync(), Observation::Unchanged);
        assert_eq!(field.authoritative(), "foob");
        assert_eq!(field.view().text, "fooba");
        timers.fire_due(t0 + ms(510));
        assert_eq!(*log.borrow(), vec!["foob".to_string(), "fooba".to_string()]);
    }

    #[test]
    fn clear_only_edits() {
        let (field, _c, timers, log) = text_field("foo");
        let t0 = Instant::now();
        assert!(field.view().show_clear);
        field.clear(t0);
        assert_eq!(field.value(), "");
        assert!(!field.view().show_clear);
        assert!(log.borrow().is_empty());
        timers.fire_due(t0 + ms(250));
        assert_eq!(*log.borrow(), vec![String::new()]);
    }

    #[test]
    fn required_field_hides_clear() {
        let timers = TimerQueue::new();
        let controller = FormController::new("name", "foo".to_string());
        let field = SyncedField::builder(TextInput::new(), controller)
            .definition(FieldDefinition::new().label("Name").required(true))
            .build(&timers, |_| {});
        let view = field.view();
        assert!(!view.show_clear);
        assert!(view.required);
        assert_eq!(view.label.as_deref(), Some("Name"));
    }

    #[test]
    fn validation_error_is_displayed_and_does_not_block() {
        let (field, controller, timers, log) = text_field("foo");
        controller.set_error("This field is required");
        let t0 = Instant::now();
        field.input("bar", t0).unwrap();
        assert_eq!(
            field.view().error.as_deref(),
            Some("This field is required")
        );
        timers.fire_due(t0 + ms(250));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn destroy_cancels_timer() {
        let (field, _c, timers, log) = text_field("foo");
        let t0 = Instant::now();
        field.input("bar", t0).unwrap();
        field.destroy();
        assert!(timers.is_empty());
        timers.fire_due(t0 + ms(1000));
        assert_eq!(field.blur(), None);
        field.input("baz", t0).unwrap();
        assert!(timers.is_empty());
        assert!(log.borrow().is_empty());
        assert_eq!(field.state(), SyncState::Destroyed);
    }

    #[test]
    fn drop_cancels_timer() {
        let (field, _c, timers, log) = text_field("foo");
        let t0 = Instant::now();
        field.input("bar", t0).unwrap();
        drop(field);
        assert!(timers.is_empty());
        assert_eq!(timers.fire_due(t0 + ms(1000)), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn blur_resends_unconfirmed_commit() {
        let (field, _c, timers, log) = text_field("foo");
        let t0 = Instant::now();
        field.input("bar", t0).unwrap();
        timers.fire_due(t0 + ms(250));
        assert_eq!(field.blur(), Some("bar".to_string()));
        assert_eq!(*log.borrow(), vec!["bar".to_string(), "bar".to_string()]);
    }

    #[test]
    fn number_field_shows_typed_text() {
        let timers = TimerQueue::new();
        let controller = FormController::new("price", None::<f64>);
        let log: Log<Option<f64>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let field = SyncedField::new(NumberInput::new(), controller, &timers, move |v| {
            sink.borrow_mut().push(v);
        });
        let t0 = Instant::now();
        for (i, raw) in ["-", "-1", "-1.", "-1.0", "-1.05"].into_iter().enumerate() {
            field.input(raw, t0 + ms(10 * i as u64)).unwrap();
            assert_eq!(field.view().text, raw);
        }
        assert_eq!(field.value(), Some(-1.05));
        timers.fire_due(t0 + ms(1000));
        assert_eq!(*log.borrow(), vec![Some(-1.05)]);
        assert_eq!(field.view().text, "-1.05");
    }

    #[test]
    fn partial_number_keeps_last_value_and_restarts_window() {
        let timers = TimerQueue::new();
        let controller = FormController::new("qty", Some(3.0));
        let field = SyncedField::new(NumberInput::new(), controller.clone(), &timers, |_| {});
        let t0 = Instant::now();
        field.input("", t0).unwrap();
        field.input("-", t0 + ms(100)).unwrap();
        assert_eq!(field.value(), None);
        assert_eq!(field.deadline(), Some(t0 + ms(350)));
        assert!(field.view().show_clear);

        // Blur commits the last complete value and drops the dangling sign.
        assert_eq!(field.blur(), Some(None));
        assert_eq!(field.view().text, "");

        field.input("7.", t0 + ms(400)).unwrap();
        controller.set(Some(9.0));
        assert_eq!(field.view().text, "9");
    }

    #[test]
    fn rejected_input_keeps_buffer() {
        let timers = TimerQueue::new();
        let controller = FormController::new("qty", Some(3.0));
        let field = SyncedField::new(NumberInput::integer(), controller, &timers, |_| {});
        let t0 = Instant::now();
        assert_eq!(
            field.input("3.5", t0),
            Err(FieldError::NotAnInteger("3.5".into()))
        );
        assert_eq!(field.value(), Some(3.0));
        assert!(timers.is_empty());
        assert_eq!(field.view().aria_label, "number-field-qty");
    }

    #[test]
    fn toggle_boolean() {
        let timers = TimerQueue::new();
        let controller = FormController::new("active", false);
        let log: Log<bool> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let field = SyncedField::new(BooleanInput::new(), controller, &timers, move |v| {
            sink.borrow_mut().push(v);
        });
        let t0 = Instant::now();
        field.toggle(t0);
        field.toggle(t0 + ms(10));
        timers.fire_due(t0 + ms(260));
        assert!(log.borrow().is_empty(), "toggled back to the stored value");
        field.toggle(t0 + ms(300));
        assert_eq!(field.blur(), Some(true));
        assert!(!field.view().show_clear);
    }

    #[test]
    fn choice_field_displays_label() {
        let timers = TimerQueue::new();
        let controller = FormController::new("currency", None::<String>);
        let input = ChoiceInput::new([Choice::new("usd", "US Dollar")]);
        let field = SyncedField::new(input, controller, &timers, |_| {});
        field.input("usd", Instant::now()).unwrap();
        let view = field.view();
        assert_eq!(view.text, "US Dollar");
        assert_eq!(view.aria_label, "choice-field-currency");
        assert!(field.input("gbp", Instant::now()).is_err());
    }

    #[test]
    fn debug_format() {
        let (field, _c, _t, _log) = text_field("foo");
        let debug = format!("{field:?}");
        assert!(debug.contains("SyncedField"));
        assert!(debug.contains("\"foo\""));
    }
}
