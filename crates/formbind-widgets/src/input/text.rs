#![forbid(unsafe_code)]

use formbind_core::{FieldError, FieldKind};
use unicode_segmentation::UnicodeSegmentation;

use super::InputAdapter;

/// Free-text input.
///
/// With a `max_length`, input longer than the limit is truncated at a
/// grapheme boundary rather than rejected, the way a browser's `maxlength`
/// behaves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInput {
    max_length: Option<usize>,
}

impl TextInput {
    /// Unbounded text input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit input to `max` graphemes.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

impl InputAdapter for TextInput {
    type Value = String;

    const KIND: FieldKind = FieldKind::Text;

    fn parse(&self, raw: &str) -> Result<String, FieldError> {
        match self.max_length {
            Some(max) => Ok(raw.graphemes(true).take(max).collect()),
            None => Ok(raw.to_string()),
        }
    }

    fn display(&self, value: &String) -> String {
        value.clone()
    }

    fn is_empty(&self, value: &String) -> bool {
        value.is_empty()
    }

    fn cleared(&self) -> String {
        String::new()
    }
}
