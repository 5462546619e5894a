//! Per-type value predicates shared by submission validation and import
//! column inference.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("Invalid email regex")
});

/// `scheme:` followed by at least one non-space character.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:(//)?[^\s/]\S*$").expect("Invalid URL regex")
});

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s()+\-.]+$").expect("Invalid phone regex"));

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub fn is_email(raw: &str) -> bool {
    EMAIL_REGEX.is_match(raw.trim())
}

pub fn is_url(raw: &str) -> bool {
    URL_REGEX.is_match(raw.trim())
}

/// Digits, spaces, parentheses, `+`, `-` and `.`, with at least one digit.
pub fn is_phone(raw: &str) -> bool {
    let trimmed = raw.trim();
    PHONE_REGEX.is_match(trimmed) && trimmed.chars().any(|c| c.is_ascii_digit())
}

pub fn is_date(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    DateTime::parse_from_rfc3339(trimmed).is_ok()
        || NAIVE_DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).is_ok())
        || NAIVE_DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(trimmed, fmt).is_ok())
}

/// Parse a finite number; `NaN` and infinities are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Canonical truthy/falsy tokens, case-insensitive.
pub fn parse_bool_token(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Number from a JSON number or a numeric string.
pub fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Integral values become JSON integers so `"42"` stores as `42`.
pub fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

/// Boolean from a JSON boolean, a 0/1 number or a canonical token.
pub fn bool_of(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => parse_bool_token(s),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(true),
            Some(v) if v == 0.0 => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Missing-equivalent: null, empty string or empty array.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Render a scalar as text; arrays and objects yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_syntax() {
        assert!(is_email("ada@example.com"));
        assert!(!is_email("ada@example"));
        assert!(!is_email("ada example.com"));
    }

    #[test]
    fn urls_need_a_scheme() {
        assert!(is_url("https://example.com/deck.pdf"));
        assert!(is_url("mailto:ada@example.com"));
        assert!(!is_url("example.com"));
        assert!(!is_url("https://"));
    }

    #[test]
    fn phone_characters() {
        assert!(is_phone("+1 (555) 010-2030"));
        assert!(is_phone("555.010.2030"));
        assert!(!is_phone("call me"));
        assert!(!is_phone("()-"));
    }

    #[test]
    fn dates_in_common_layouts() {
        assert!(is_date("2024-03-01"));
        assert!(is_date("2024-03-01T10:30:00Z"));
        assert!(is_date("03/01/2024"));
        assert!(!is_date("next tuesday"));
    }

    #[test]
    fn numbers_must_be_finite() {
        assert_eq!(parse_number(" 42.5 "), Some(42.5));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("12k"), None);
    }

    #[test]
    fn bool_tokens() {
        assert_eq!(parse_bool_token("YES"), Some(true));
        assert_eq!(parse_bool_token("0"), Some(false));
        assert_eq!(parse_bool_token("maybe"), None);
    }
}
