//! Row transformation from raw import rows to submission objects.

use std::collections::BTreeMap;

use pairing_model::{FieldDefinition, FieldType};
use pairing_validate::format::{
    bool_of, is_blank, is_date, is_email, is_phone, is_url, number_of, number_value, scalar_text,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::hints::multi_tokens;
use crate::preview::ImportRow;

/// Column choice meaning "leave this field empty".
pub const UNMAPPED: &str = "none";

/// Field key to source column name; [`UNMAPPED`] marks a skipped field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    columns: BTreeMap<String, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field_key: impl Into<String>, column: impl Into<String>) -> Self {
        self.set(field_key, column);
        self
    }

    pub fn set(&mut self, field_key: impl Into<String>, column: impl Into<String>) {
        self.columns.insert(field_key.into(), column.into());
    }

    pub fn unset(&mut self, field_key: &str) {
        self.columns.insert(field_key.to_string(), UNMAPPED.to_string());
    }

    /// Source column for a field, or `None` when missing or unmapped.
    pub fn column_for(&self, field_key: &str) -> Option<&str> {
        self.columns
            .get(field_key)
            .map(String::as_str)
            .filter(|column| *column != UNMAPPED && !column.is_empty())
    }

    /// Mapped `(field_key, column)` pairs.
    pub fn mapped(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .filter(|(_, column)| column.as_str() != UNMAPPED && !column.is_empty())
            .map(|(key, column)| (key.as_str(), column.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.mapped().next().is_none()
    }
}

impl FromIterator<(String, String)> for ColumnMapping {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// Transform one raw row into a submission object.
///
/// Unmapped fields, blank cells and values that cannot be coerced to the
/// field's type are omitted; so are emails, URLs, phone numbers and dates
/// that fail their syntax check. Without `create_options`, option-bearing values
/// must name an existing option by value or label (case-insensitive) and are
/// stored as the option's value; with it, any non-empty value is kept.
pub fn transform_row(
    fields: &[FieldDefinition],
    row: &ImportRow,
    mapping: &ColumnMapping,
    create_options: bool,
) -> Map<String, Value> {
    let mut out = Map::new();
    for field in fields.iter().filter(|f| f.carries_data()) {
        let Some(column) = mapping.column_for(&field.key) else {
            continue;
        };
        let Some(raw) = row.get(column) else {
            continue;
        };
        if is_blank(raw) {
            continue;
        }
        if let Some(value) = transform_value(field, raw, create_options) {
            out.insert(field.key.clone(), value);
        }
    }
    out
}

/// Coerce a single non-blank raw value for `field`.
pub fn transform_value(field: &FieldDefinition, raw: &Value, create_options: bool) -> Option<Value> {
    match &field.field_type {
        FieldType::Button => None,
        FieldType::Number => number_of(raw).map(number_value),
        FieldType::Checkbox => bool_of(raw).map(Value::Bool),
        FieldType::Select | FieldType::Radio => {
            let text = scalar_text(raw)?;
            let text = text.trim();
            match field.options.normalize(text) {
                Some(value) => Some(Value::String(value.to_string())),
                None if create_options && !text.is_empty() => Some(Value::String(text.to_string())),
                None => None,
            }
        }
        FieldType::MultiSelect => {
            let tokens = multi_tokens(raw)?;
            let mut values: Vec<String> = Vec::with_capacity(tokens.len());
            for token in &tokens {
                let value = match field.options.normalize(token) {
                    Some(value) => value.to_string(),
                    None if create_options => token.clone(),
                    None => return None,
                };
                if !values.contains(&value) {
                    values.push(value);
                }
            }
            (!values.is_empty()).then(|| Value::Array(values.into_iter().map(Value::String).collect()))
        }
        FieldType::Date => checked_text(raw, is_date),
        FieldType::Email => checked_text(raw, is_email),
        FieldType::Url => checked_text(raw, is_url),
        FieldType::Phone => checked_text(raw, is_phone),
        FieldType::Text | FieldType::Textarea | FieldType::File => {
            let text = scalar_text(raw)?;
            let text = text.trim();
            (!text.is_empty()).then(|| Value::String(text.to_string()))
        }
        FieldType::Unknown(_) => Some(raw.clone()),
    }
}

/// Trimmed text, kept only when it satisfies `predicate`.
fn checked_text(raw: &Value, predicate: fn(&str) -> bool) -> Option<Value> {
    let text = scalar_text(raw)?;
    let text = text.trim();
    predicate(text).then(|| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use pairing_model::FieldOption;
    use serde_json::json;

    use super::*;

    #[test]
    fn none_means_unmapped() {
        let mapping = ColumnMapping::new().with("stage", "Stage").with("raise", UNMAPPED);
        assert_eq!(mapping.column_for("stage"), Some("Stage"));
        assert_eq!(mapping.column_for("raise"), None);
        assert_eq!(mapping.column_for("missing"), None);
        assert_eq!(mapping.mapped().count(), 1);
    }

    #[test]
    fn multiselect_requires_every_token_without_create_mode() {
        let field = FieldDefinition::new("sectors", "Sectors", FieldType::MultiSelect)
            .with_options(vec![FieldOption::from_value("tech")]);
        assert_eq!(transform_value(&field, &json!("tech, crypto"), false), None);
        assert_eq!(
            transform_value(&field, &json!("TECH, crypto"), true),
            Some(json!(["tech", "crypto"]))
        );
    }

    #[test]
    fn repeated_tokens_collapse() {
        let field = FieldDefinition::new("sectors", "Sectors", FieldType::MultiSelect)
            .with_options(vec![FieldOption::from_value("tech")]);
        assert_eq!(transform_value(&field, &json!("tech,Tech"), false), Some(json!(["tech"])));
    }
}
