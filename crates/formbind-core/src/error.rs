#![forbid(unsafe_code)]

//! Errors raised when raw input cannot be turned into a field value.
//!
//! Rejected input never reaches the local buffer: the field keeps showing the
//! last accepted value and no debounce is scheduled.

/// Errors from input adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Raw text is not a number.
    InvalidNumber(String),
    /// Number parsed but is NaN or infinite.
    NonFiniteNumber(String),
    /// Number has a fractional part but the field only accepts integers.
    NotAnInteger(String),
    /// Raw text is not a recognized boolean spelling.
    InvalidBoolean(String),
    /// Value is not one of the declared choices.
    UnknownChoice(String),
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber(raw) => write!(f, "not a number: {raw:?}"),
            Self::NonFiniteNumber(raw) => write!(f, "number is not finite: {raw:?}"),
            Self::NotAnInteger(raw) => write!(f, "expected a whole number: {raw:?}"),
            Self::InvalidBoolean(raw) => write!(f, "not a boolean: {raw:?}"),
            Self::UnknownChoice(raw) => write!(f, "unknown choice: {raw:?}"),
        }
    }
}

impl std::error::Error for FieldError {}
