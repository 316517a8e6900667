//! Value coercions used by the normalizer. All functions are total.

use serde_json::{Map, Value};

use crate::models::resume::MAX_SKILL_LEVEL;

/// Level assigned when a structured skill has a missing or unreadable level.
pub const DEFAULT_SKILL_LEVEL: u8 = 50;
/// Level assigned when a skill arrives as a bare name.
pub const BARE_SKILL_LEVEL: u8 = 70;

static EMPTY_MAP: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();

/// Borrows `value` as an object, or an empty object when it is anything else.
pub fn as_map(value: Option<&Value>) -> &Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map,
        _ => EMPTY_MAP.get_or_init(Map::new),
    }
}

/// Borrows `value` as an array slice, or an empty slice when it is anything else.
pub fn as_list(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

/// Coerces a scalar to a trimmed string.
///
/// Strings are trimmed, numbers use their JSON form (`2021`, `3.8`), and
/// everything else becomes empty.
pub fn to_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => number_text(n),
        _ => String::new(),
    }
}

/// Like [`to_text`] but returns `None` instead of an empty string.
pub fn to_nonempty_text(value: Option<&Value>) -> Option<String> {
    Some(to_text(value)).filter(|s| !s.is_empty())
}

fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        // 2021.0 is a year, not a decimal
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// Coerces a list-ish value to a list of non-empty trimmed strings.
///
/// An array keeps its scalar items; a single string is split on commas when
/// `split_commas` is set, otherwise it becomes a one-element list.
pub fn to_text_list(value: Option<&Value>, split_commas: bool) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| to_nonempty_text(Some(item)))
            .collect(),
        Some(Value::String(s)) if split_commas => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

/// Coerces a raw skill level into `0..=100`.
///
/// Integers and floats are truncated toward zero and clamped. Numeric strings
/// (optionally suffixed with `%`) are parsed the same way. Anything else,
/// including a missing value, yields [`DEFAULT_SKILL_LEVEL`].
pub fn to_level(value: Option<&Value>) -> u8 {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(|i| i as f64)
            .or_else(|| n.as_u64().map(|u| u as f64))
            .or_else(|| n.as_f64()),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.strip_suffix('%').unwrap_or(s).trim().parse::<f64>().ok()
        }
        _ => None,
    };

    match parsed {
        Some(f) if f.is_finite() => f.trunc().clamp(0.0, MAX_SKILL_LEVEL as f64) as u8,
        _ => DEFAULT_SKILL_LEVEL,
    }
}

/// Name of a JSON value's type, for diagnostics.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
