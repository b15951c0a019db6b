//! One comparison strategy per field category.
//!
//! Each strategy is a pure function of the two raw values. The thresholds are
//! fixed constants shared by every profile set.

mod containers;
mod numeric;
mod text;

use super::normalizer::ValueTypeError;
use super::registry::FieldCategory;
use super::status::{FieldVerdict, ValidationStatus};
use super::value::FieldValue;

pub use containers::container_set;

/// Relative band for float fields, as a fraction of the source value.
pub const FLOAT_TOLERANCE: f64 = 0.01;
/// Container token-set score required for `MatchedMostly`.
pub const CONTAINER_MATCH_THRESHOLD: u8 = 85;
/// Partial-match score required for `MatchedMostly`.
pub const PARTIAL_MATCH_THRESHOLD: u8 = 80;
/// Generic score above which one value is treated as a subset of the other.
pub const NEAR_PERFECT_THRESHOLD: u8 = 95;
/// Generic score required for `MatchedMostly`.
pub const SIMILAR_THRESHOLD: u8 = 75;

pub const TOLERANCE_SCORE: u8 = 99;
pub const CONTENT_ONLY_SCORE: u8 = 99;

/// Routes a present value pair to the strategy for `category`.
///
/// Numeric parse failures come back as `Err` so the caller decides how to
/// record them.
pub fn compare(
    category: FieldCategory,
    source: &FieldValue,
    target: &FieldValue,
) -> Result<FieldVerdict, ValueTypeError> {
    let (source_text, target_text) = (source.to_text(), target.to_text());
    match category {
        FieldCategory::Integer => numeric::compare_integers(&source_text, &target_text),
        FieldCategory::Float => {
            numeric::compare_floats(&source_text, &target_text, FLOAT_TOLERANCE)
        }
        FieldCategory::Currency => numeric::compare_currency(&source_text, &target_text),
        FieldCategory::ContainerList => Ok(containers::compare_containers(source, target)),
        FieldCategory::PartialMatchText => Ok(text::compare_partial(&source_text, &target_text)),
        FieldCategory::MultiLineText | FieldCategory::SimpleText | FieldCategory::Generic => {
            Ok(text::compare_generic(&source_text, &target_text))
        }
    }
}

impl From<ValueTypeError> for FieldVerdict {
    fn from(err: ValueTypeError) -> Self {
        FieldVerdict::unscored(ValidationStatus::TypeError, err.to_string())
    }
}

pub fn validate_integer(source: &str, target: &str) -> FieldVerdict {
    numeric::compare_integers(source, target).unwrap_or_else(FieldVerdict::from)
}

pub fn validate_float(source: &str, target: &str) -> FieldVerdict {
    numeric::compare_floats(source, target, FLOAT_TOLERANCE).unwrap_or_else(FieldVerdict::from)
}

pub fn validate_currency(source: &str, target: &str) -> FieldVerdict {
    numeric::compare_currency(source, target).unwrap_or_else(FieldVerdict::from)
}

pub fn validate_containers(source: &FieldValue, target: &FieldValue) -> FieldVerdict {
    containers::compare_containers(source, target)
}

pub fn validate_partial_match(source: &str, target: &str) -> FieldVerdict {
    text::compare_partial(source, target)
}

pub fn validate_generic(source: &str, target: &str) -> FieldVerdict {
    text::compare_generic(source, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_validators_convert_parse_failures() {
        let verdict = validate_integer("100", "abc");
        assert_eq!(verdict.status, ValidationStatus::TypeError);
        assert_eq!(verdict.score, None);
        assert_eq!(
            verdict.notes.as_deref(),
            Some("Could not parse one or both values as a whole number.")
        );

        assert_eq!(
            validate_float("100.00", "100.5").status,
            ValidationStatus::MatchedWithTolerance
        );
        assert_eq!(
            validate_currency("$1,000.00", "1000.00").status,
            ValidationStatus::MatchedExactly
        );
    }

    #[test]
    fn simple_and_multi_line_text_use_the_generic_strategy() {
        let source = FieldValue::from("MSC ANNA");
        let target = FieldValue::from("msc anna");
        for category in [
            FieldCategory::SimpleText,
            FieldCategory::MultiLineText,
            FieldCategory::Generic,
        ] {
            let verdict = compare(category, &source, &target).expect("text never fails");
            assert_eq!(verdict.status, ValidationStatus::MatchedContentOnly);
        }
    }

    #[test]
    fn numeric_categories_accept_json_numbers() {
        let verdict = compare(
            FieldCategory::Integer,
            &FieldValue::from(1920_i64),
            &FieldValue::from("1,920"),
        )
        .expect("integers parse");
        assert_eq!(verdict.status, ValidationStatus::MatchedExactly);
    }
}
