// src/dataset/normalize.rs - Field coercion for heterogeneous spreadsheet-style input
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dataset::table::Table;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Parses a cell as a finite number. Blank, non-numeric, NaN and infinite
/// values all become `None`; this never fails.
pub fn coerce_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric view of a named column. An absent column coerces to all-missing.
pub fn coerce_numeric_column(table: &Table, column: &str) -> Vec<Option<f64>> {
    match table.column(column) {
        Some(values) => values.into_iter().map(coerce_numeric).collect(),
        None => vec![None; table.len()],
    }
}

/// Text view of a cell; an absent field becomes the empty string.
pub fn coerce_text(value: Option<&str>) -> String {
    value.map(str::to_string).unwrap_or_default()
}

/// Text view of a named column. An absent column coerces to all-empty.
pub fn coerce_text_column(table: &Table, column: &str) -> Vec<String> {
    match table.column(column) {
        Some(values) => values.into_iter().map(|v| coerce_text(Some(v))).collect(),
        None => vec![String::new(); table.len()],
    }
}

/// Equality key for identifier-like text such as postcodes: embedded
/// whitespace removed, lower-cased.
pub fn normalize_identifier(value: &str) -> String {
    WHITESPACE.replace_all(value, "").to_lowercase()
}
