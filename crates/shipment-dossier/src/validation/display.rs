//! Presentation helpers for reports; nothing here affects a verdict.

use super::normalizer::parse_decimal;
use super::registry::FieldCategory;
use super::validators::container_set;
use super::value::FieldValue;

/// `total_gross_mass_kg` -> `Total Gross Mass Kg`.
pub fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Renders a raw value the way its category is best read.
pub fn format_value(category: FieldCategory, value: &FieldValue) -> String {
    if value.is_missing() {
        return String::new();
    }

    match category {
        FieldCategory::ContainerList => container_set(value)
            .into_iter()
            .collect::<Vec<_>>()
            .join("\n"),
        FieldCategory::Integer => format_number(value, 0, ""),
        FieldCategory::Float => format_number(value, 2, ""),
        FieldCategory::Currency => {
            let text = value.to_text();
            let symbol = text
                .chars()
                .find(|ch| matches!(ch, '€' | '$' | '£'))
                .map(String::from)
                .unwrap_or_default();
            format_number(value, 2, &symbol)
        }
        FieldCategory::MultiLineText
        | FieldCategory::SimpleText
        | FieldCategory::PartialMatchText => value.to_text(),
        FieldCategory::Generic => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_text())
        }
    }
}

fn format_number(value: &FieldValue, decimals: usize, prefix: &str) -> String {
    let text = value.to_text();
    let Some(number) = parse_decimal(&text) else {
        return text;
    };

    let number = if decimals == 0 { number.trunc() } else { number };
    let formatted = format!("{:.*}", decimals, number.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let sign = if number < 0.0 { "-" } else { "" };
    let mut rendered = format!("{sign}{prefix}{}", group_thousands(whole));
    if let Some(fraction) = fraction {
        rendered.push('.');
        rendered.push_str(fraction);
    }
    rendered
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
