#![forbid(unsafe_code)]

//! Render model for a synchronized field.
//!
//! A [`FieldView`] is a snapshot the host toolkit draws from. Its `text` is
//! always the local buffer, never the controller's value or a debounced
//! snapshot, so the user sees their own latest keystrokes mid-debounce.

use formbind_core::{FieldKind, SyncState};

/// Everything needed to draw one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldView {
    /// Unique element id.
    pub id: String,
    /// Controller field name.
    pub name: String,
    /// Field kind.
    pub kind: FieldKind,
    /// Accessibility label, `"<kind>-field-<name>"`.
    pub aria_label: String,
    /// Visible label.
    pub label: Option<String>,
    /// Help text.
    pub description: Option<String>,
    /// Placeholder for an empty input.
    pub placeholder: Option<String>,
    /// Input type hint.
    pub type_hint: Option<String>,
    /// Display text of the local buffer.
    pub text: String,
    /// Validation error from the controller.
    pub error: Option<String>,
    /// Whether the field is required.
    pub required: bool,
    /// Show the clear affordance (optional field with a non-empty buffer).
    pub show_clear: bool,
    /// Synchronization state at snapshot time.
    pub state: SyncState,
}

impl FieldView {
    /// Whether an error should be drawn.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Text to draw inside the input: the buffer, or the placeholder when the
    /// buffer is empty.
    #[must_use]
    pub fn display_text(&self) -> &str {
        if self.text.is_empty() {
            self.placeholder.as_deref().unwrap_or("")
        } else {
            &self.text
        }
    }
}
