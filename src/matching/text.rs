// src/matching/text.rs - Token-order-insensitive free-text similarity
use rapidfuzz::distance::indel;

use crate::models::matching::{SignalEvidence, SignalType};

/// Joins two text fields the way both registers' grouped comparisons expect.
pub fn join_fields(first: &str, second: &str) -> String {
    format!("{} {}", first, second)
}

/// Similarity on a 0-100 scale that ignores word order: tokens of each
/// string are sorted before the two are compared with `ratio`.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sort_tokens(a), &sort_tokens(b))
}

fn sort_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Normalized indel similarity on a 0-100 scale, `100 * 2 * LCS / (len(a) + len(b))`
/// counted in chars. Two empty strings are identical (100).
pub fn ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 100.0;
    }
    let distance = indel::distance(a.chars(), b.chars());
    100.0 * (total - distance) as f64 / total as f64
}

/// Grouped text signal, triggered when the similarity reaches `threshold`.
/// Two blank sides are identical and trigger.
pub fn evaluate_group(
    signal: SignalType,
    project_text: &str,
    connection_text: &str,
    threshold: f64,
) -> Option<SignalEvidence> {
    if token_sort_ratio(project_text, connection_text) >= threshold {
        Some(SignalEvidence::new(signal, project_text, connection_text))
    } else {
        None
    }
}
