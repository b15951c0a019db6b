use super::super::normalizer::{normalize_numeric, parse_decimal, parse_whole, ValueTypeError};
use super::super::status::{FieldVerdict, ValidationStatus};
use super::{FLOAT_TOLERANCE, TOLERANCE_SCORE};

pub(crate) fn compare_integers(source: &str, target: &str) -> Result<FieldVerdict, ValueTypeError> {
    let parse = |text: &str| {
        parse_whole(text).ok_or_else(|| ValueTypeError::Integer {
            value: normalize_numeric(text),
        })
    };
    let (expected, found) = (parse(source)?, parse(target)?);

    if expected == found {
        Ok(FieldVerdict::new(ValidationStatus::MatchedExactly, 100))
    } else {
        Ok(FieldVerdict::new(ValidationStatus::DoesNotMatch, 0)
            .with_notes(format!("Expected {expected}, but found {found}.")))
    }
}

/// Float comparison with a band relative to the source magnitude.
///
/// The band is `source * tolerance`, so a zero or negative source only
/// accepts exact equality.
pub(crate) fn compare_floats(
    source: &str,
    target: &str,
    tolerance: f64,
) -> Result<FieldVerdict, ValueTypeError> {
    let parse = |text: &str| {
        parse_decimal(text).ok_or_else(|| ValueTypeError::Decimal {
            value: normalize_numeric(text),
        })
    };
    let (expected, found) = (parse(source)?, parse(target)?);

    if expected == found {
        return Ok(FieldVerdict::new(ValidationStatus::MatchedExactly, 100));
    }

    if (expected - found).abs() <= expected * tolerance {
        Ok(
            FieldVerdict::new(ValidationStatus::MatchedWithTolerance, TOLERANCE_SCORE).with_notes(
                format!(
                    "Values are within the {:.1}% tolerance range.",
                    tolerance * 100.0
                ),
            ),
        )
    } else {
        Ok(FieldVerdict::new(ValidationStatus::DoesNotMatch, 0)
            .with_notes(format!("Expected ~{expected:.2}, but found {found:.2}.")))
    }
}

/// Currency amounts must agree exactly once symbols and separators are gone.
pub(crate) fn compare_currency(source: &str, target: &str) -> Result<FieldVerdict, ValueTypeError> {
    let normalize = |text: &str| {
        let normalized = normalize_numeric(text);
        match parse_decimal(text) {
            Some(_) => Ok(normalized),
            None => Err(ValueTypeError::Currency { value: normalized }),
        }
    };
    let (expected, found) = (normalize(source)?, normalize(target)?);

    if expected == found {
        Ok(FieldVerdict::new(ValidationStatus::MatchedExactly, 100))
    } else {
        Ok(FieldVerdict::new(ValidationStatus::DoesNotMatch, 0).with_notes(format!(
            "Values do not match after removing currency symbols. Expected '{expected}', found '{found}'."
        )))
    }
}
