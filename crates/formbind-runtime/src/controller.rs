#![forbid(unsafe_code)]

//! Observable-backed form controller.
//!
//! [`FormController`] plays the part a form-state library plays in a web
//! front end: it owns one field's authoritative value, its default (for
//! reset) and its validation error. Clones share state, so the consumer
//! callback can hold a clone and write the persisted value back.

use std::cell::RefCell;
use std::rc::Rc;

use formbind_core::{ChangeFn, Controller, ControllerWatch};

use crate::reactive::Observable;

/// Authoritative state for one named field.
pub struct FormController<T> {
    name: Rc<str>,
    value: Observable<T>,
    error: Observable<Option<String>>,
    default: Rc<RefCell<T>>,
}

impl<T> Clone for FormController<T> {
    fn clone(&self) -> Self {
        Self {
            name: Rc::clone(&self.name),
            value: self.value.clone(),
            error: self.error.clone(),
            default: Rc::clone(&self.default),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for FormController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("error", &self.error)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> FormController<T> {
    /// Create a controller whose value starts at (and resets to) `default`.
    #[must_use]
    pub fn new(name: impl Into<Rc<str>>, default: T) -> Self {
        Self {
            name: name.into(),
            value: Observable::new(default.clone()),
            error: Observable::new(None),
            default: Rc::new(RefCell::new(default)),
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Replace the value. Returns `true` if it changed.
    pub fn set(&self, value: T) -> bool {
        self.value.set(value)
    }

    /// Restore the default value and clear the error.
    pub fn reset(&self) {
        let default = self.default.borrow().clone();
        tracing::debug!(field = %self.name, "controller reset");
        self.value.set(default);
        self.error.set(None);
    }

    /// Replace the default and reset to it (e.g. after a record reload).
    pub fn reset_to(&self, value: T) {
        *self.default.borrow_mut() = value;
        self.reset();
    }

    /// Whether the value differs from the default.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.value.with(|v| *v != *self.default.borrow())
    }

    /// Attach a validation error.
    pub fn set_error(&self, message: impl Into<String>) {
        self.error.set(Some(message.into()));
    }

    /// Remove the validation error.
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

impl<T: Clone + PartialEq + 'static> Controller<T> for FormController<T> {
    fn value(&self) -> T {
        self.value.get()
    }

    fn error(&self) -> Option<String> {
        self.error.get()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_value(&self, value: T) {
        self.value.set(value);
    }

    fn version(&self) -> Option<u64> {
        Some(self.value.version())
    }

    fn watch(&self, on_change: ChangeFn) -> Option<ControllerWatch> {
        let subscription = self.value.subscribe(move |_| on_change());
        Some(ControllerWatch::new(subscription))
    }
}
