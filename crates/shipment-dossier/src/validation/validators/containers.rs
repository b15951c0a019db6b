use super::super::similarity::token_set_ratio;
use super::super::status::{FieldVerdict, ValidationStatus};
use super::super::value::FieldValue;
use super::CONTAINER_MATCH_THRESHOLD;
use std::collections::BTreeSet;

/// Upper-cased container numbers, split on whitespace and commas.
pub fn container_set(value: &FieldValue) -> BTreeSet<String> {
    let split = |text: &str| -> Vec<String> {
        text.split(|ch: char| ch.is_whitespace() || ch == ',')
            .filter(|token| !token.is_empty())
            .map(str::to_uppercase)
            .collect()
    };

    match value {
        FieldValue::Null => BTreeSet::new(),
        FieldValue::Text(text) => split(text).into_iter().collect(),
        FieldValue::List(items) => items.iter().flat_map(|item| split(item)).collect(),
        FieldValue::Number(number) => split(&number.to_string()).into_iter().collect(),
    }
}

pub(crate) fn compare_containers(source: &FieldValue, target: &FieldValue) -> FieldVerdict {
    let expected = container_set(source);
    let found = container_set(target);

    if expected == found {
        return FieldVerdict::new(ValidationStatus::MatchedExactly, 100);
    }

    let joined = |set: &BTreeSet<String>| set.iter().cloned().collect::<Vec<_>>().join(" ");
    let score = token_set_ratio(&joined(&expected), &joined(&found));

    let missing: Vec<&str> = expected.difference(&found).map(String::as_str).collect();
    let extra: Vec<&str> = found.difference(&expected).map(String::as_str).collect();
    let mut notes = Vec::new();
    if !missing.is_empty() {
        notes.push(format!("Missing from target: {}", missing.join(", ")));
    }
    if !extra.is_empty() {
        notes.push(format!("Extra in target: {}", extra.join(", ")));
    }

    let status = if score > CONTAINER_MATCH_THRESHOLD {
        ValidationStatus::MatchedMostly
    } else {
        ValidationStatus::DoesNotMatch
    };
    FieldVerdict::new(status, score).with_notes(notes.join(". "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_and_delimited_string_compare_as_sets() {
        let source = FieldValue::from(vec!["MAEU1234567", "MAEU7654321"]);
        let target = FieldValue::from("MAEU1234567, MAEU7654321");

        let verdict = compare_containers(&source, &target);

        assert_eq!(verdict.status, ValidationStatus::MatchedExactly);
        assert_eq!(verdict.score, Some(100));
        assert!(verdict.notes.is_none());
    }

    #[test]
    fn container_tokens_are_case_and_order_insensitive() {
        let source = FieldValue::from("msku0000001\nMSKU0000002");
        let target = FieldValue::from(vec!["MSKU0000002 MSKU0000001"]);
        assert_eq!(
            compare_containers(&source, &target).status,
            ValidationStatus::MatchedExactly
        );
    }

    #[test]
    fn subset_of_containers_is_mostly_matched_with_diagnostics() {
        let source = FieldValue::from(vec!["MAEU1234567", "MAEU7654321"]);
        let target = FieldValue::from("MAEU1234567");

        let verdict = compare_containers(&source, &target);

        assert_eq!(verdict.status, ValidationStatus::MatchedMostly);
        assert_eq!(verdict.score, Some(100));
        assert_eq!(
            verdict.notes.as_deref(),
            Some("Missing from target: MAEU7654321")
        );
    }

    #[test]
    fn single_misread_container_still_matches_mostly() {
        let source = FieldValue::from(vec!["MAEU1234567", "MAEU7654321"]);
        let target = FieldValue::from(vec!["MAEU1234567", "MAEU7654999"]);

        let verdict = compare_containers(&source, &target);

        assert_eq!(verdict.status, ValidationStatus::MatchedMostly);
        assert_eq!(verdict.score, Some(87));
        assert_eq!(
            verdict.notes.as_deref(),
            Some("Missing from target: MAEU7654321. Extra in target: MAEU7654999")
        );
    }

    #[test]
    fn disjoint_containers_do_not_match() {
        let source = FieldValue::from("TCLU1111111");
        let target = FieldValue::from("GESU9999999");

        let verdict = compare_containers(&source, &target);

        assert_eq!(verdict.status, ValidationStatus::DoesNotMatch);
        assert!(verdict.score.is_some_and(|score| score <= 85));
        assert_eq!(
            verdict.notes.as_deref(),
            Some("Missing from target: TCLU1111111. Extra in target: GESU9999999")
        );
    }
}
