//! Validation failure types.
//!
//! Each [`FieldIssue`] variant carries only the data its message needs.
//! [`FieldErrors`] holds at most one issue per field key.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldIssue {
    /// Required field is missing, null, empty or an empty list.
    Required,
    ExpectedString,
    ExpectedNumber,
    ExpectedBoolean,
    ExpectedArray,
    InvalidEmail,
    InvalidUrl,
    InvalidPhone,
    OutOfRange {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Single choice value is not one of the option values.
    NotAnOption { value: String },
    /// Multiple choice contains values outside the option values.
    NotOptions { values: Vec<String> },
}

impl FieldIssue {
    /// Short machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            FieldIssue::Required => "required",
            FieldIssue::ExpectedString => "expected_string",
            FieldIssue::ExpectedNumber => "expected_number",
            FieldIssue::ExpectedBoolean => "expected_boolean",
            FieldIssue::ExpectedArray => "expected_array",
            FieldIssue::InvalidEmail => "invalid_email",
            FieldIssue::InvalidUrl => "invalid_url",
            FieldIssue::InvalidPhone => "invalid_phone",
            FieldIssue::OutOfRange { .. } => "out_of_range",
            FieldIssue::NotAnOption { .. } => "not_an_option",
            FieldIssue::NotOptions { .. } => "not_options",
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::Required => write!(f, "This field is required"),
            FieldIssue::ExpectedString => write!(f, "Expected text"),
            FieldIssue::ExpectedNumber => write!(f, "Expected a number"),
            FieldIssue::ExpectedBoolean => write!(f, "Expected true or false"),
            FieldIssue::ExpectedArray => write!(f, "Expected a list of choices"),
            FieldIssue::InvalidEmail => write!(f, "Invalid email address"),
            FieldIssue::InvalidUrl => write!(f, "Invalid URL"),
            FieldIssue::InvalidPhone => write!(f, "Invalid phone number"),
            FieldIssue::OutOfRange { value, min, max } => match (min, max) {
                (Some(min), Some(max)) => {
                    write!(f, "{value} is outside the range {min} to {max}")
                }
                (Some(min), None) => write!(f, "{value} is below the minimum {min}"),
                (None, Some(max)) => write!(f, "{value} is above the maximum {max}"),
                (None, None) => write!(f, "{value} is out of range"),
            },
            FieldIssue::NotAnOption { value } => write!(f, "'{value}' is not a valid choice"),
            FieldIssue::NotOptions { values } => {
                write!(f, "Invalid choices: {}", values.join(", "))
            }
        }
    }
}

/// Per-field validation failures, keyed by field key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    issues: BTreeMap<String, FieldIssue>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, issue: FieldIssue) {
        self.issues.insert(key.into(), issue);
    }

    pub fn get(&self, key: &str) -> Option<&FieldIssue> {
        self.issues.get(key)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.issues.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldIssue)> {
        self.issues.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Display messages keyed by field, ready for a form to render.
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.issues
            .iter()
            .map(|(key, issue)| (key.clone(), issue.to_string()))
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|(key, issue)| format!("{key}: {issue}"))
            .collect();
        write!(f, "{} invalid field(s): {}", self.issues.len(), parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}
