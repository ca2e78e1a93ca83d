#![forbid(unsafe_code)]

use formbind_core::{FieldError, FieldKind};

use super::InputAdapter;

/// One selectable option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    /// Stored value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl Choice {
    /// Create an option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Selection from a fixed list of options. No selection is `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChoiceInput {
    choices: Vec<Choice>,
}

impl ChoiceInput {
    /// Create from a list of options.
    #[must_use]
    pub fn new(choices: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
        }
    }

    /// Declared options.
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    fn find(&self, value: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.value == value)
    }
}

impl InputAdapter for ChoiceInput {
    type Value = Option<String>;

    const KIND: FieldKind = FieldKind::Choice;

    fn parse(&self, raw: &str) -> Result<Option<String>, FieldError> {
        if raw.is_empty() {
            return Ok(None);
        }
        self.find(raw)
            .map(|c| Some(c.value.clone()))
            .ok_or_else(|| FieldError::UnknownChoice(raw.to_string()))
    }

    fn display(&self, value: &Option<String>) -> String {
        match value {
            None => String::new(),
            Some(v) => self
                .find(v)
                .map_or_else(|| v.clone(), |c| c.label.clone()),
        }
    }

    fn is_empty(&self, value: &Option<String>) -> bool {
        value.is_none()
    }

    fn cleared(&self) -> Option<String> {
        None
    }
}
