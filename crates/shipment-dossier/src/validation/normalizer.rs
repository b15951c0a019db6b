/// Lower-cased bag of words for similarity scoring.
///
/// Line breaks, tabs and `,.:;()` become spaces, every other character that is
/// not an ASCII letter, ASCII digit or whitespace is dropped, and whitespace
/// runs collapse to a single space. Idempotent.
pub fn normalize_fuzzy(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter_map(|ch| match ch {
            '\n' | '\t' | ',' | '.' | ':' | ';' | '(' | ')' => Some(' '),
            ch if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch.is_whitespace() => {
                Some(ch)
            }
            _ => None,
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strips thousands separators and everything except digits, `.` and `-`.
///
/// The result is not guaranteed to parse: `"1.2.3"` survives unchanged and
/// has to be rejected by the caller.
pub fn normalize_numeric(text: &str) -> String {
    text.chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-'))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueTypeError {
    #[error("Could not parse one or both values as a whole number.")]
    Integer { value: String },
    #[error("Could not parse one or both values as a decimal number.")]
    Decimal { value: String },
    #[error("Could not parse one or both currency values.")]
    Currency { value: String },
}

impl ValueTypeError {
    /// The normalized text that failed to parse.
    pub fn value(&self) -> &str {
        match self {
            ValueTypeError::Integer { value }
            | ValueTypeError::Decimal { value }
            | ValueTypeError::Currency { value } => value,
        }
    }
}

pub(crate) fn parse_decimal(text: &str) -> Option<f64> {
    normalize_numeric(text)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Whole number with OCR artifacts such as `"120.0"` tolerated by truncation.
pub(crate) fn parse_whole(text: &str) -> Option<i64> {
    parse_decimal(text)
        .map(f64::trunc)
        .filter(|value| *value >= i64::MIN as f64 && *value <= i64::MAX as f64)
        .map(|value| value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuzzy_normalization_builds_bag_of_words() {
        assert_eq!(
            normalize_fuzzy("ACME Fruit (Pty) Ltd.\n12 Main Rd,\tPAARL; 7646"),
            "acme fruit pty ltd 12 main rd paarl 7646"
        );
        assert_eq!(normalize_fuzzy("Rotterdam - NL!"), "rotterdam nl");
        assert_eq!(normalize_fuzzy("  \n\t "), "");
    }

    #[test]
    fn fuzzy_normalization_drops_non_ascii_letters() {
        assert_eq!(normalize_fuzzy("Café Müller"), "caf mller");
    }

    #[test]
    fn fuzzy_normalization_is_idempotent() {
        let inputs = [
            "Port of ROTTERDAM,\nThe Netherlands",
            "MSC  ANNA / 412N",
            "c/o Fresh-Produce Ltd. (Unit 4)",
        ];
        for input in inputs {
            let once = normalize_fuzzy(input);
            assert_eq!(normalize_fuzzy(&once), once);
        }
    }

    #[test]
    fn numeric_normalization_strips_symbols_and_separators() {
        assert_eq!(normalize_numeric("$1,234.50"), "1234.50");
        assert_eq!(normalize_numeric("€ -12,000"), "-12000");
        assert_eq!(normalize_numeric("18 500 KG"), "18500");
        assert_eq!(normalize_numeric("1.2.3"), "1.2.3");
    }

    #[test]
    fn parsing_rejects_malformed_numbers() {
        assert_eq!(parse_decimal("1,234.5 kg"), Some(1234.5));
        assert_eq!(parse_decimal("1.2.3"), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("-"), None);
        assert_eq!(parse_whole("120.0"), Some(120));
        assert_eq!(parse_whole("99.9"), Some(99));
    }
}
