#![forbid(unsafe_code)]

//! Pass-through rendering options for a field.
//!
//! Nothing here affects synchronization; the definition only feeds the
//! rendered view (label, placeholder, clear affordance gating).

use core::fmt;

/// The kind of value a field edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Numeric entry.
    Number,
    /// Checkbox / switch.
    Boolean,
    /// Selection from a fixed list of options.
    Choice,
}

impl FieldKind {
    /// Lowercase name used in accessibility labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Choice => "choice",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a form field, usually generated from a record schema.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldDefinition {
    /// Visible label.
    pub label: Option<String>,
    /// Help text rendered below the input.
    pub description: Option<String>,
    /// Placeholder shown while the input is empty.
    pub placeholder: Option<String>,
    /// Input type hint (`"email"`, `"url"`, `"password"`, ...).
    #[cfg_attr(feature = "serde", serde(rename = "field_type"))]
    pub type_hint: Option<String>,
    /// Required fields never offer the clear affordance.
    pub required: bool,
}

impl FieldDefinition {
    /// Create an empty, optional definition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the input type hint.
    #[must_use]
    pub fn type_hint(mut self, hint: impl Into<String>) -> Self {
        self.type_hint = Some(hint.into());
        self
    }

    /// Mark the field as required (or not).
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}
