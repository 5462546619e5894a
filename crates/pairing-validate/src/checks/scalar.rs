//! Text-like and numeric checks.

use pairing_model::NumericBounds;
use serde_json::Value;

use crate::format::{is_email, is_phone, is_url, number_of, number_value};
use crate::issue::FieldIssue;

/// Extra syntax a string value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextFormat {
    Plain,
    Email,
    Url,
    Phone,
}

impl TextFormat {
    fn accepts(self, raw: &str) -> bool {
        match self {
            TextFormat::Plain => true,
            TextFormat::Email => is_email(raw),
            TextFormat::Url => is_url(raw),
            TextFormat::Phone => is_phone(raw),
        }
    }

    fn issue(self) -> FieldIssue {
        match self {
            TextFormat::Plain => FieldIssue::ExpectedString,
            TextFormat::Email => FieldIssue::InvalidEmail,
            TextFormat::Url => FieldIssue::InvalidUrl,
            TextFormat::Phone => FieldIssue::InvalidPhone,
        }
    }
}

pub(super) fn text(value: &Value, format: TextFormat) -> Result<Value, FieldIssue> {
    let Value::String(raw) = value else {
        return Err(FieldIssue::ExpectedString);
    };
    if format.accepts(raw) {
        Ok(value.clone())
    } else {
        Err(format.issue())
    }
}

pub(super) fn number(value: &Value, bounds: Option<&NumericBounds>) -> Result<Value, FieldIssue> {
    let n = number_of(value).ok_or(FieldIssue::ExpectedNumber)?;
    if let Some(bounds) = bounds
        && !bounds.contains(n)
    {
        return Err(FieldIssue::OutOfRange {
            value: n,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(match value {
        Value::Number(_) => value.clone(),
        _ => number_value(n),
    })
}
