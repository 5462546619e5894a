//! Per-type value checks.
//!
//! Each check receives a non-blank value and either returns the value to store
//! (coerced where the mode allows) or the issue explaining the rejection.

mod choice;
mod scalar;

use serde_json::Value;

use crate::compiler::{RuleKind, ValidationMode};
use crate::issue::FieldIssue;

pub(crate) use scalar::TextFormat;

/// Run the check for one compiled rule.
pub(crate) fn check(kind: &RuleKind, value: &Value, mode: ValidationMode) -> Result<Value, FieldIssue> {
    match kind {
        RuleKind::Text(format) => scalar::text(value, *format),
        RuleKind::Number(bounds) => scalar::number(value, bounds.as_ref()),
        RuleKind::Single(options) => choice::single(value, options),
        RuleKind::Multi(options) => choice::multi(value, options),
        RuleKind::Checkbox => choice::checkbox(value, mode),
        RuleKind::Opaque => Ok(value.clone()),
    }
}
