//! Column compatibility inference.
//!
//! A column is offered for a field when **at least one** non-blank preview
//! value satisfies the field's type predicate. Dirty rows do not disqualify a
//! column; strict checks happen when rows are transformed and validated.

use std::collections::BTreeMap;

use pairing_model::{FieldDefinition, FieldType};
use pairing_validate::format::{
    bool_of, is_date, is_email, is_phone, is_url, number_of, scalar_text,
};
use serde_json::Value;

use crate::preview::ImportPreview;

/// Split a multiple-choice cell into trimmed, non-empty tokens.
///
/// The `" ,"` delimiter variant is checked before plain `","`.
pub fn split_multi(raw: &str) -> Vec<&str> {
    let delimiter = if raw.contains(" ,") { " ," } else { "," };
    raw.split(delimiter)
        .flat_map(|part| part.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Whether one raw value satisfies the field's type predicate.
///
/// With `create_options`, any non-empty text fits an option-bearing field
/// because unseen values will be added as options.
pub fn value_fits(field: &FieldDefinition, value: &Value, create_options: bool) -> bool {
    match &field.field_type {
        FieldType::Button => false,
        FieldType::Number => number_of(value).is_some(),
        FieldType::Checkbox => bool_of(value).is_some(),
        FieldType::Select | FieldType::Radio => scalar_text(value)
            .is_some_and(|raw| create_options || field.options.is_valid_loose(&raw)),
        FieldType::MultiSelect => multi_tokens(value).is_some_and(|tokens| {
            !tokens.is_empty()
                && (create_options || tokens.iter().all(|t| field.options.is_valid_loose(t)))
        }),
        FieldType::Date => text_matches(value, is_date),
        FieldType::Email => text_matches(value, is_email),
        FieldType::Url => text_matches(value, is_url),
        FieldType::Phone => text_matches(value, is_phone),
        FieldType::Text | FieldType::Textarea | FieldType::File | FieldType::Unknown(_) => true,
    }
}

/// Tokens of a multiple-choice value given as a delimited string or a list.
pub(crate) fn multi_tokens(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(scalar_text)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        other => scalar_text(other).map(|raw| {
            split_multi(&raw)
                .into_iter()
                .map(str::to_string)
                .collect()
        }),
    }
}

fn text_matches(value: &Value, predicate: fn(&str) -> bool) -> bool {
    scalar_text(value).is_some_and(|raw| predicate(&raw))
}

/// Column inference over one preview.
#[derive(Debug, Clone, Copy)]
pub struct ColumnInference<'a> {
    preview: &'a ImportPreview,
    create_options: bool,
}

impl<'a> ColumnInference<'a> {
    pub fn new(preview: &'a ImportPreview) -> Self {
        Self {
            preview,
            create_options: false,
        }
    }

    #[must_use]
    pub fn with_create_options(mut self, create_options: bool) -> Self {
        self.create_options = create_options;
        self
    }

    pub fn preview(&self) -> &'a ImportPreview {
        self.preview
    }

    pub fn is_compatible(&self, field: &FieldDefinition, column: &str) -> bool {
        self.preview
            .column_values(column)
            .any(|value| value_fits(field, value, self.create_options))
    }

    /// Preview columns compatible with `field`, in header order.
    pub fn compatible_columns(&self, field: &FieldDefinition) -> Vec<&'a str> {
        self.preview
            .columns()
            .iter()
            .map(String::as_str)
            .filter(|column| self.is_compatible(field, column))
            .collect()
    }

    /// Compatible columns for every data-carrying field, keyed by field key.
    pub fn matrix(&self, fields: &[FieldDefinition]) -> BTreeMap<String, Vec<String>> {
        fields
            .iter()
            .filter(|field| field.carries_data())
            .map(|field| {
                let columns = self
                    .compatible_columns(field)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (field.key.clone(), columns)
            })
            .collect()
    }
}

/// Existence check: does any preview value of `column` fit `field`?
pub fn is_column_compatible(field: &FieldDefinition, preview: &ImportPreview, column: &str) -> bool {
    ColumnInference::new(preview).is_compatible(field, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_handles_both_delimiters() {
        assert_eq!(split_multi("tech, health"), vec!["tech", "health"]);
        assert_eq!(split_multi("tech ,health"), vec!["tech", "health"]);
        assert_eq!(split_multi("tech ,health,fintech"), vec!["tech", "health", "fintech"]);
        assert_eq!(split_multi(" , "), Vec::<&str>::new());
    }
}
