//! Normalization of loosely typed host input.
//!
//! Every raw value that reaches [`crate::pagination::PaginationState::apply`]
//! or the config loader passes through here, so all entry points share the
//! same numeric and boolean domain rules. Invalid input never errors; it
//! degrades to a fallback value.

use serde_json::Value;

/// Coerce a raw value into a non-negative integer, falling back to `0`.
pub fn coerce_number(value: &Value) -> usize {
    coerce_number_or(value, 0)
}

/// Coerce a raw value into a non-negative integer.
///
/// Numbers and numeric strings are accepted. Fractions truncate toward zero
/// and negative values clamp to `0`. Booleans, null, arrays, objects and
/// unparseable strings yield `fallback`.
pub fn coerce_number_or(value: &Value, fallback: usize) -> usize {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => {
            if n <= 0.0 {
                0
            } else if n >= usize::MAX as f64 {
                usize::MAX
            } else {
                n.trunc() as usize
            }
        }
        _ => fallback,
    }
}

/// Coerce a raw value into a boolean.
///
/// Null, `false` and the string `"false"` are false; every other value,
/// including the empty string, is true. This lets a bare attribute such as
/// `hide_page_size=""` switch a flag on.
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => s.trim() != "false",
        _ => true,
    }
}

/// Coerce a raw value into a list of page sizes.
///
/// Arrays coerce each entry, strings split on commas, and a lone scalar
/// becomes a one-element list. Null and objects give an empty list.
pub fn coerce_number_list(value: &Value) -> Vec<usize> {
    match value {
        Value::Array(items) => items.iter().map(coerce_number).collect(),
        Value::String(s) => parse_number_list(s),
        Value::Number(_) => vec![coerce_number(value)],
        _ => Vec::new(),
    }
}

/// Parse a comma-separated list such as `"5, 10,25"`.
///
/// Empty segments are skipped; malformed ones coerce to `0`.
pub fn parse_number_list(input: &str) -> Vec<usize> {
    input
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| coerce_number(&Value::String(segment.to_string())))
        .collect()
}

fn parse_numeric_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
