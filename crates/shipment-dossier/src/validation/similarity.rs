//! Token-based fuzzy similarity scores in the 0..=100 range.
//!
//! Scores are indel (longest common subsequence) similarities over processed
//! text: lower-cased with every non-alphanumeric character turned into a
//! space. Either side being empty after processing scores 0.

use std::collections::BTreeSet;

/// Upper bound for scores that relied on expanding an abbreviation.
pub const ABBREVIATION_SCORE_CAP: u8 = 90;

/// Similarity of the two inputs after sorting their tokens.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let (a, b) = (process(a), process(b));
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let sorted = |text: &str| {
        let mut tokens: Vec<&str> = text.split_whitespace().collect();
        tokens.sort_unstable();
        tokens.join(" ")
    };

    to_score(indel_similarity(&sorted(&a), &sorted(&b)))
}

/// Similarity over token sets; a shared core plus a strict subset scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let (a, b) = (process(a), process(b));
    let left: BTreeSet<&str> = a.split_whitespace().collect();
    let right: BTreeSet<&str> = b.split_whitespace().collect();
    if left.is_empty() || right.is_empty() {
        return 0;
    }

    let shared: Vec<&str> = left.intersection(&right).copied().collect();
    let only_left: Vec<&str> = left.difference(&right).copied().collect();
    let only_right: Vec<&str> = right.difference(&left).copied().collect();

    if !shared.is_empty() && (only_left.is_empty() || only_right.is_empty()) {
        return 100;
    }

    let sect = shared.join(" ");
    let diff_left = only_left.join(" ");
    let diff_right = only_right.join(" ");

    let sect_len = sect.chars().count();
    let left_len = diff_left.chars().count();
    let right_len = diff_right.chars().count();
    // Length of "sect <diff>"; the separator only exists with a shared core.
    let combined = |diff_len: usize| sect_len + usize::from(sect_len > 0) + diff_len;

    // "sect <diff_left>" against "sect <diff_right>": the shared core only
    // lengthens both sides, it never adds edits.
    let left_chars: Vec<char> = diff_left.chars().collect();
    let right_chars: Vec<char> = diff_right.chars().collect();
    let distance =
        left_len + right_len - 2 * longest_common_subsequence(&left_chars, &right_chars);
    let mut best = 1.0 - distance as f64 / (combined(left_len) + combined(right_len)) as f64;

    if sect_len > 0 {
        // "sect" against "sect <diff>" differs only by the appended diff.
        let extended =
            |diff_len: usize| 1.0 - (1 + diff_len) as f64 / (sect_len + combined(diff_len)) as f64;
        best = best.max(extended(left_len)).max(extended(right_len));
    }

    to_score(best)
}

/// Token-set similarity after expanding abbreviations on either side.
///
/// A 2-4 letter token abbreviates a longer token sharing its first letter when
/// its remaining letters are consonants appearing there in order
/// (`nl` / `netherlands`), or a run of tokens whose initials it spells
/// (`uk` / `united kingdom`). Returns `None` when no abbreviation was found,
/// otherwise a score capped at [`ABBREVIATION_SCORE_CAP`].
pub fn abbreviation_ratio(a: &str, b: &str) -> Option<u8> {
    let (a, b) = (process(a), process(b));
    let left: Vec<&str> = a.split_whitespace().collect();
    let right: Vec<&str> = b.split_whitespace().collect();

    let (left_expanded, left_changed) = expand_abbreviations(&left, &right);
    let (right_expanded, right_changed) = expand_abbreviations(&right, &left);
    if !left_changed && !right_changed {
        return None;
    }

    let score = token_set_ratio(&left_expanded.join(" "), &right_expanded.join(" "));
    Some(score.min(ABBREVIATION_SCORE_CAP))
}

fn expand_abbreviations<'a>(tokens: &[&'a str], others: &[&'a str]) -> (Vec<&'a str>, bool) {
    let mut expanded = Vec::with_capacity(tokens.len());
    let mut changed = false;

    for &token in tokens {
        if others.contains(&token) {
            expanded.push(token);
            continue;
        }
        match expansion_for(token, others) {
            Some(expansion) => {
                expanded.extend_from_slice(expansion);
                changed = true;
            }
            None => expanded.push(token),
        }
    }

    (expanded, changed)
}

fn expansion_for<'o, 'a>(token: &str, others: &'o [&'a str]) -> Option<&'o [&'a str]> {
    let len = token.chars().count();
    if !(2..=4).contains(&len) || !token.chars().all(|ch| ch.is_alphabetic()) {
        return None;
    }

    let initialism = others.windows(len).find(|window| {
        window
            .iter()
            .filter_map(|word| word.chars().next())
            .eq(token.chars())
    });
    if let Some(window) = initialism {
        return Some(window);
    }

    others
        .iter()
        .position(|word| is_contraction(token, word))
        .map(|index| &others[index..=index])
}

/// `short` keeps the first letter of `word` plus consonants taken from it in
/// order. A vowel after the first letter never counts, so two-letter tokens
/// such as `ny` or `sa` do not contract unrelated names like `norway`.
fn is_contraction(short: &str, word: &str) -> bool {
    if word.chars().count() <= short.chars().count() || short.chars().next() != word.chars().next()
    {
        return false;
    }
    if short.chars().skip(1).any(is_vowel) {
        return false;
    }

    let mut remaining = word.chars();
    short
        .chars()
        .all(|wanted| remaining.by_ref().any(|ch| ch == wanted))
}

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

fn process(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { ' ' })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn indel_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * longest_common_subsequence(&a, &b)) as f64 / total as f64
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &left in a {
        let mut diagonal = 0;
        for (j, &right) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if left == right {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

fn to_score(similarity: f64) -> u8 {
    (similarity * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}
