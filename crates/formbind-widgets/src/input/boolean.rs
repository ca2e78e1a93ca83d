#![forbid(unsafe_code)]

use formbind_core::{FieldError, FieldKind};

use super::InputAdapter;

/// Checkbox / switch input. Never empty, so never clearable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BooleanInput;

impl BooleanInput {
    /// Create a boolean adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InputAdapter for BooleanInput {
    type Value = bool;

    const KIND: FieldKind = FieldKind::Boolean;

    fn parse(&self, raw: &str) -> Result<bool, FieldError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(FieldError::InvalidBoolean(raw.to_string())),
        }
    }

    fn display(&self, value: &bool) -> String {
        value.to_string()
    }

    fn is_empty(&self, _value: &bool) -> bool {
        false
    }

    fn cleared(&self) -> bool {
        false
    }

    fn clearable(&self) -> bool {
        false
    }
}
