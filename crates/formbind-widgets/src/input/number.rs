#![forbid(unsafe_code)]

use formbind_core::{FieldError, FieldKind};

use super::InputAdapter;

/// Numeric input. An empty input is `None`. The field keeps the typed text
/// on screen; the parsed number is what gets committed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NumberInput {
    integer: bool,
}

impl NumberInput {
    /// Accept any finite number.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept whole numbers only.
    #[must_use]
    pub fn integer() -> Self {
        Self { integer: true }
    }
}

impl InputAdapter for NumberInput {
    type Value = Option<f64>;

    const KIND: FieldKind = FieldKind::Number;

    fn parse(&self, raw: &str) -> Result<Option<f64>, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let number: f64 = trimmed
            .parse()
            .map_err(|_| FieldError::InvalidNumber(raw.to_string()))?;
        if !number.is_finite() {
            return Err(FieldError::NonFiniteNumber(raw.to_string()));
        }
        if self.integer && number.fract() != 0.0 {
            return Err(FieldError::NotAnInteger(raw.to_string()));
        }
        Ok(Some(number))
    }

    fn display(&self, value: &Option<f64>) -> String {
        match value {
            None => String::new(),
            Some(n) if self.integer => format!("{n:.0}"),
            Some(n) => n.to_string(),
        }
    }

    fn is_empty(&self, value: &Option<f64>) -> bool {
        value.is_none()
    }

    fn cleared(&self) -> Option<f64> {
        None
    }

    fn keeps_raw_text(&self) -> bool {
        true
    }

    fn is_partial(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        let unsigned = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
        if unsigned.is_empty() {
            return !trimmed.is_empty();
        }
        if self.integer {
            return false;
        }
        if unsigned == "." {
            return true;
        }
        // Exponent still being typed: "1e", "2.5E-".
        let stem = unsigned.strip_suffix(['-', '+']).unwrap_or(unsigned);
        stem.strip_suffix(['e', 'E'])
            .is_some_and(|mantissa| !mantissa.is_empty() && mantissa.parse::<f64>().is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_empty() {
        let input = NumberInput::new();
        assert_eq!(input.parse(" 12.5 "), Ok(Some(12.5)));
        assert_eq!(input.parse(""), Ok(None));
        assert_eq!(input.parse("-3"), Ok(Some(-3.0)));
    }

    #[test]
    fn rejects_garbage_and_infinities() {
        let input = NumberInput::new();
        assert_eq!(
            input.parse("12a"),
            Err(FieldError::InvalidNumber("12a".into()))
        );
        assert_eq!(
            input.parse("inf"),
            Err(FieldError::NonFiniteNumber("inf".into()))
        );
        assert!(input.parse("NaN").is_err());
    }

    #[test]
    fn integer_mode() {
        let input = NumberInput::integer();
        assert_eq!(input.parse("42"), Ok(Some(42.0)));
        assert_eq!(input.parse("4.2"), Err(FieldError::NotAnInteger("4.2".into())));
        assert_eq!(input.display(&Some(42.0)), "42");
    }

    #[test]
    fn partial_keystrokes() {
        let input = NumberInput::new();
        for raw in ["-", "+", ".", "-.", "1e", "2.5E-"] {
            assert!(input.is_partial(raw), "{raw}");
            assert!(input.parse(raw).is_err(), "{raw}");
        }
        for raw in ["", "1", "1x", "e", "--"] {
            assert!(!input.is_partial(raw), "{raw}");
        }
        assert_eq!(input.parse("1."), Ok(Some(1.0)));

        let integer = NumberInput::integer();
        assert!(integer.is_partial("-"));
        assert!(!integer.is_partial("."));
        assert!(!integer.is_partial("1e"));
    }

    #[test]
    fn display() {
        let input = NumberInput::new();
        assert_eq!(input.display(&None), "");
        assert_eq!(input.display(&Some(1.25)), "1.25");
        assert!(input.is_empty(&input.cleared()));
    }
}
