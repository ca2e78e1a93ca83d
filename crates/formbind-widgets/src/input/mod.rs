#![forbid(unsafe_code)]

//! Type-specific input adapters.
//!
//! An adapter turns raw user input into a typed field value and back into
//! display text. Adapters carry no synchronization logic; every kind goes
//! through the same [`SyncedField`](crate::SyncedField).

mod boolean;
mod choice;
mod number;
mod text;

pub use boolean::BooleanInput;
pub use choice::{Choice, ChoiceInput};
pub use number::NumberInput;
pub use text::TextInput;

use formbind_core::{FieldError, FieldKind};

/// Conversion between raw input and a typed field value.
pub trait InputAdapter {
    /// The value type held by the controller and the local buffer.
    type Value: Clone + PartialEq + std::fmt::Debug + 'static;

    /// Field kind, used for accessibility labels.
    const KIND: FieldKind;

    /// Interpret raw input. Rejected input leaves the buffer untouched.
    fn parse(&self, raw: &str) -> Result<Self::Value, FieldError>;

    /// Text shown in the input for `value`.
    fn display(&self, value: &Self::Value) -> String;

    /// Whether `value` counts as empty (hides the clear affordance).
    fn is_empty(&self, value: &Self::Value) -> bool;

    /// Value the clear affordance writes into the buffer.
    fn cleared(&self) -> Self::Value;

    /// Whether this kind offers a clear affordance at all.
    fn clearable(&self) -> bool {
        true
    }

    /// Whether the input shows the raw text the user typed rather than
    /// `display(value)`. Numeric inputs keep `"1."` or `"1.0"` on screen.
    fn keeps_raw_text(&self) -> bool {
        false
    }

    /// Whether `raw` is an incomplete but acceptable keystroke sequence
    /// (a lone `"-"` in a numeric field). Partial input is shown but leaves
    /// the typed value unchanged.
    fn is_partial(&self, raw: &str) -> bool {
        let _ = raw;
        false
    }
}
