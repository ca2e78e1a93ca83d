#![forbid(unsafe_code)]

//! The controller contract a field is wired against.
//!
//! A controller owns the authoritative value and the validation error. The
//! field reads both on every synchronization pass and never writes the value
//! itself; persisting goes through the consumer callback, which may in turn
//! call [`Controller::set_value`].
//!
//! A controller that can push change notifications implements
//! [`Controller::watch`]; the field then resets its buffer as soon as the
//! value moves instead of on its next pass.

use std::any::Any;
use std::rc::Rc;

/// Callback registered through [`Controller::watch`].
pub type ChangeFn = Rc<dyn Fn()>;

/// Registration of a change callback. Dropping it unregisters the callback.
#[must_use = "dropping the watch unregisters the callback"]
pub struct ControllerWatch {
    _guard: Box<dyn Any>,
}

impl ControllerWatch {
    /// Wrap whatever guard keeps the controller's registration alive.
    pub fn new(guard: impl Any) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

impl std::fmt::Debug for ControllerWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerWatch").finish_non_exhaustive()
    }
}

/// External owner of a field's authoritative value.
pub trait Controller<T> {
    /// Current authoritative value.
    fn value(&self) -> T;

    /// Current validation error, if any. Advisory only.
    fn error(&self) -> Option<String>;

    /// Stable field name, used for accessibility labels and logging.
    fn name(&self) -> &str;

    /// Commit entry point for the consumer layer.
    fn set_value(&self, value: T);

    /// Monotonic change counter, when the controller tracks one.
    ///
    /// If two consecutive passes observe the same version the field skips the
    /// value comparison. `None` means "always compare".
    fn version(&self) -> Option<u64> {
        None
    }

    /// Call `on_change` whenever the value changes.
    ///
    /// `None` means the controller cannot notify; the field still compares
    /// on every pass.
    fn watch(&self, on_change: ChangeFn) -> Option<ControllerWatch> {
        let _ = on_change;
        None
    }
}

impl<T, C: Controller<T> + ?Sized> Controller<T> for Rc<C> {
    fn value(&self) -> T {
        (**self).value()
    }

    fn error(&self) -> Option<String> {
        (**self).error()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_value(&self, value: T) {
        (**self).set_value(value);
    }

    fn version(&self) -> Option<u64> {
        (**self).version()
    }

    fn watch(&self, on_change: ChangeFn) -> Option<ControllerWatch> {
        (**self).watch(on_change)
    }
}

impl<T, C: Controller<T> + ?Sized> Controller<T> for &C {
    fn value(&self) -> T {
        (**self).value()
    }

    fn error(&self) -> Option<String> {
        (**self).error()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_value(&self, value: T) {
        (**self).set_value(value);
    }

    fn version(&self) -> Option<u64> {
        (**self).version()
    }

    fn watch(&self, on_change: ChangeFn) -> Option<ControllerWatch> {
        (**self).watch(on_change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Plain {
        value: RefCell<i32>,
    }

    impl Controller<i32> for Plain {
        fn value(&self) -> i32 {
            *self.value.borrow()
        }
        fn error(&self) -> Option<String> {
            None
        }
        fn name(&self) -> &str {
            "qty"
        }
        fn set_value(&self, value: i32) {
            *self.value.borrow_mut() = value;
        }
    }

    #[test]
    fn rc_forwards() {
        let c = Rc::new(Plain {
            value: RefCell::new(1),
        });
        let shared = Rc::clone(&c);
        Controller::set_value(&shared, 5);
        assert_eq!(c.value(), 5);
        assert_eq!(Controller::<i32>::name(&shared), "qty");
        assert_eq!(Controller::<i32>::version(&shared), None);
        assert!(Controller::<i32>::watch(&shared, Rc::new(|| {})).is_none());
    }

    #[test]
    fn reference_forwards() {
        let c = Plain {
            value: RefCell::new(3),
        };
        let r = &c;
        assert_eq!(Controller::<i32>::value(&r), 3);
        assert!(Controller::<i32>::error(&r).is_none());
    }
}
