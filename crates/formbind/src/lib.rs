#![forbid(unsafe_code)]

//! formbind public facade.
//!
//! Debounced, echo-free synchronization between form controllers and
//! editable fields. See [`widgets::SyncedField`] for the component and
//! [`sync_core::FieldSync`] for the toolkit-independent state machine.

pub use formbind_core as sync_core;
pub use formbind_runtime as runtime;
pub use formbind_widgets as widgets;

pub use formbind_core::{
    ChangeFn, Controller, ControllerWatch, Duration, FieldDefinition, FieldError, FieldId,
    FieldKind, FieldSync, Instant, Observation, SyncState,
};
pub use formbind_runtime::{ConfigError, FormController, SyncConfig, TimerHandle, TimerQueue};
pub use formbind_widgets::{
    BooleanInput, Choice, ChoiceInput, FieldView, InputAdapter, NumberInput, SyncedField,
    TextInput,
};

/// Everything needed to mount and drive fields.
pub mod prelude {
    pub use crate::{
        BooleanInput, Choice, ChoiceInput, Controller, Duration, FieldDefinition, FieldView,
        FormController, InputAdapter, Instant, NumberInput, SyncConfig, SyncedField, TextInput,
        TimerQueue,
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn facade_leaves_builtin_core_reachable() {
        let field = super::sync_core::FieldSync::new(1_u8);
        assert_eq!(*field.local(), 1);
        assert_eq!(core::mem::size_of::<u8>(), 1);
    }
}
