//! Option lists for choice fields.
//!
//! An option has two parts:
//! - **value**: the identity used for validation and compatibility
//! - **label**: display text, also accepted when matching imported data
//!
//! ## Matching Rules
//!
//! - Submissions must carry the exact `value` (string identity).
//! - Imported data is matched case-insensitively against `value` or `label`
//!   and normalized to the option's `value`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A single selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Display text. May be empty when the source only carried a value.
    #[serde(default)]
    pub label: String,

    /// Stored identity of the option.
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Option whose label and value are the same text.
    pub fn from_value(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    /// Case-insensitive match against either the value or the label.
    pub fn matches_loose(&self, raw: &str) -> bool {
        let raw = raw.trim();
        eq_fold(&self.value, raw) || (!self.label.is_empty() && eq_fold(&self.label, raw))
    }
}

/// Ordered option list belonging to one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    options: Vec<FieldOption>,
}

impl OptionSet {
    pub fn new(options: Vec<FieldOption>) -> Self {
        Self { options }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldOption> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn push(&mut self, option: FieldOption) {
        self.options.push(option);
    }

    /// The option values as an order-free set.
    pub fn value_set(&self) -> BTreeSet<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }

    /// Exact `value` identity check used by submission validation.
    pub fn contains_value(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Find the option matching `raw` by value or label, ignoring case.
    ///
    /// Exact value matches take precedence over label matches.
    pub fn find_loose(&self, raw: &str) -> Option<&FieldOption> {
        let trimmed = raw.trim();
        self.options
            .iter()
            .find(|o| o.value == trimmed)
            .or_else(|| self.options.iter().find(|o| o.matches_loose(trimmed)))
    }

    /// Check if `raw` names an existing option (case-insensitive).
    pub fn is_valid_loose(&self, raw: &str) -> bool {
        self.find_loose(raw).is_some()
    }

    /// Normalize `raw` to the canonical option value, if it names one.
    pub fn normalize(&self, raw: &str) -> Option<&str> {
        self.find_loose(raw).map(|o| o.value.as_str())
    }

    /// First value that appears more than once, if any.
    pub fn duplicate_value(&self) -> Option<&str> {
        let mut seen = BTreeSet::new();
        self.options
            .iter()
            .map(|o| o.value.as_str())
            .find(|value| !seen.insert(*value))
    }
}

impl FromIterator<FieldOption> for OptionSet {
    fn from_iter<T: IntoIterator<Item = FieldOption>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a FieldOption;
    type IntoIter = std::slice::Iter<'a, FieldOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

fn eq_fold(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.to_lowercase()
}
