//! Option-bearing and boolean checks.

use pairing_model::OptionSet;
use serde_json::Value;

use crate::compiler::ValidationMode;
use crate::format::{bool_of, scalar_text};
use crate::issue::FieldIssue;

pub(super) fn single(value: &Value, options: &OptionSet) -> Result<Value, FieldIssue> {
    match value {
        Value::String(raw) if options.contains_value(raw) => Ok(value.clone()),
        other => Err(FieldIssue::NotAnOption {
            value: display(other),
        }),
    }
}

pub(super) fn multi(value: &Value, options: &OptionSet) -> Result<Value, FieldIssue> {
    let Value::Array(items) = value else {
        return Err(FieldIssue::ExpectedArray);
    };
    let invalid: Vec<String> = items
        .iter()
        .filter(|item| !matches!(item, Value::String(raw) if options.contains_value(raw)))
        .map(display)
        .collect();
    if invalid.is_empty() {
        Ok(value.clone())
    } else {
        Err(FieldIssue::NotOptions { values: invalid })
    }
}

/// Strict booleans for submissions; canonical tokens are also accepted on import.
pub(super) fn checkbox(value: &Value, mode: ValidationMode) -> Result<Value, FieldIssue> {
    let parsed = match mode {
        ValidationMode::Submission => value.as_bool(),
        ValidationMode::Import => bool_of(value),
    };
    parsed.map(Value::Bool).ok_or(FieldIssue::ExpectedBoolean)
}

fn display(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| value.to_string())
}
