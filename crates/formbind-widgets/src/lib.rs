#![forbid(unsafe_code)]

//! Synchronized editable fields for formbind.
//!
//! [`SyncedField`] wires the [`FieldSync`](formbind_core::FieldSync) core to a
//! [`Controller`](formbind_core::Controller), a debounce timer on a
//! [`TimerQueue`](formbind_runtime::TimerQueue) and the consumer's commit
//! callback. Type-specific behavior lives in thin [`InputAdapter`]s.

pub mod field;
pub mod input;
pub mod view;

pub use field::{FieldBuilder, SyncedField};
pub use input::{BooleanInput, Choice, ChoiceInput, InputAdapter, NumberInput, TextInput};
pub use view::FieldView;
