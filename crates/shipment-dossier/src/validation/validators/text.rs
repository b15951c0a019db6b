use super::super::normalizer::normalize_fuzzy;
use super::super::similarity::{abbreviation_ratio, token_set_ratio, token_sort_ratio};
use super::super::status::{FieldVerdict, ValidationStatus};
use super::{
    CONTENT_ONLY_SCORE, NEAR_PERFECT_THRESHOLD, PARTIAL_MATCH_THRESHOLD, SIMILAR_THRESHOLD,
};
use std::collections::BTreeSet;

/// Lenient comparison for ports and other abbreviation-prone fields.
pub(crate) fn compare_partial(source: &str, target: &str) -> FieldVerdict {
    let expected = normalize_fuzzy(source);
    let found = normalize_fuzzy(target);

    if expected == found {
        return FieldVerdict::new(ValidationStatus::MatchedExactly, 100);
    }

    let set_score = token_set_ratio(&expected, &found);
    let score = abbreviation_ratio(&expected, &found)
        .map_or(set_score, |aligned| aligned.max(set_score));

    if score > PARTIAL_MATCH_THRESHOLD {
        FieldVerdict::new(ValidationStatus::MatchedMostly, score).with_notes(format!(
            "Values are highly similar (Score: {score}%). This may be an abbreviation match."
        ))
    } else {
        FieldVerdict::new(ValidationStatus::DoesNotMatch, score).with_notes(format!(
            "Values are significantly different (Score: {score}%)."
        ))
    }
}

/// Addresses and free text: best of token-sort and token-set similarity.
///
/// Never returns `MatchedExactly`; identical content with different
/// formatting is `MatchedContentOnly`.
pub(crate) fn compare_generic(source: &str, target: &str) -> FieldVerdict {
    let expected = normalize_fuzzy(source);
    let found = normalize_fuzzy(target);

    if expected == found {
        return FieldVerdict::new(ValidationStatus::MatchedContentOnly, CONTENT_ONLY_SCORE)
            .with_notes("Content matches, but formatting (e.g., punctuation, case) differs.");
    }

    let sort_score = token_sort_ratio(&expected, &found);
    let set_score = token_set_ratio(&expected, &found);
    let score = sort_score.max(set_score);

    if score > NEAR_PERFECT_THRESHOLD {
        return FieldVerdict::new(ValidationStatus::MatchedMostly, score).with_notes(
            "One value appears to be a perfect or near-perfect subset of the other.",
        );
    }
    if score > SIMILAR_THRESHOLD {
        return FieldVerdict::new(ValidationStatus::MatchedMostly, score)
            .with_notes("Values are highly similar but have notable differences.");
    }

    let source_words: BTreeSet<&str> = expected.split_whitespace().collect();
    let target_words: BTreeSet<&str> = found.split_whitespace().collect();
    let missing: Vec<&str> = source_words.difference(&target_words).copied().collect();
    let extra: Vec<&str> = target_words.difference(&source_words).copied().collect();

    let mut notes = Vec::new();
    if !missing.is_empty() {
        notes.push(format!(
            "Words in source not in target: {}",
            missing.join(", ")
        ));
    }
    if !extra.is_empty() {
        notes.push(format!("Words in target not in source: {}", extra.join(", ")));
    }
    if notes.is_empty() {
        notes.push(format!(
            "Fuzzy Match Score: {score}% (Sort: {sort_score}%, Set: {set_score}%)"
        ));
    }

    FieldVerdict::new(ValidationStatus::DoesNotMatch, score).with_notes(notes.join(" "))
}
