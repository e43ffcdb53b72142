//! Text cleanup primitives: whitespace normalization, case folding and
//! multi-select splitting.

use crate::config::FieldDescriptor;

/// Collapses every run of whitespace into a single space and trims the ends.
///
/// A missing value normalizes to the empty string. The case is preserved: use
/// [fold_case] before comparing answers.
pub fn normalize(raw: Option<&str>) -> String {
    match raw {
        Some(s) => normalize_str(s),
        None => String::new(),
    }
}

pub fn normalize_str(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Lowercases a string for matching. No locale-specific rules are applied.
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// The comparable form of an answer: normalized then folded.
pub fn token(raw: &str) -> String {
    fold_case(&normalize_str(raw))
}

/// Splits a multi-select answer into its normalized, non-empty pieces,
/// in their original order.
pub fn split_multiselect(raw: Option<&str>, delimiter: &str) -> Vec<String> {
    match raw {
        Some(s) if !delimiter.is_empty() => s
            .split(delimiter)
            .map(normalize_str)
            .filter(|piece| !piece.is_empty())
            .collect(),
        _ => single(raw),
    }
}

/// Splits an answer according to the field: multi-select fields are split on
/// their delimiter, other fields give at most one piece.
pub fn split_response(raw: Option<&str>, descriptor: &FieldDescriptor) -> Vec<String> {
    if descriptor.multiselect {
        split_multiselect(raw, &descriptor.delimiter)
    } else {
        single(raw)
    }
}

fn single(raw: Option<&str>) -> Vec<String> {
    let s = normalize(raw);
    if s.is_empty() {
        vec![]
    } else {
        vec![s]
    }
}
