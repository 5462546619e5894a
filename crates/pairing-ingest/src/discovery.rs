//! Discovery of new choice options from imported values.

use std::collections::BTreeMap;

use pairing_model::{CaseInsensitiveSet, FieldDefinition, FieldOption, FieldType};
use pairing_validate::format::scalar_text;
use serde_json::Value;

use crate::hints::split_multi;
use crate::preview::ImportRow;
use crate::transform::ColumnMapping;

/// New options per field key, to be persisted by the caller.
pub type OptionsToAdd = BTreeMap<String, Vec<FieldOption>>;

/// Distinct, trimmed, non-empty values not already offered by `field`.
///
/// Comparison is case-insensitive against existing option labels and values;
/// the first spelling seen is kept. Multiple-choice cells are split into
/// tokens first. Non option-bearing fields yield nothing.
pub fn new_options<'a, I>(field: &FieldDefinition, column_values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Value>,
{
    if !field.is_option_bearing() {
        return Vec::new();
    }
    let mut seen = CaseInsensitiveSet::default();
    let mut discovered = Vec::new();

    let mut consider = |token: &str| {
        let token = token.trim();
        if token.is_empty() || field.options.is_valid_loose(token) {
            return;
        }
        if seen.insert(token) {
            discovered.push(token.to_string());
        }
    };

    for value in column_values {
        match value {
            Value::Array(items) => {
                for item in items.iter().filter_map(scalar_text) {
                    consider(&item);
                }
            }
            other => {
                let Some(raw) = scalar_text(other) else {
                    continue;
                };
                if field.field_type == FieldType::MultiSelect {
                    for token in split_multi(&raw) {
                        consider(token);
                    }
                } else {
                    consider(&raw);
                }
            }
        }
    }
    discovered
}

/// Gather new options for every mapped option-bearing field over `rows`.
///
/// Fields with nothing new are left out of the result.
pub fn collect_options_to_add(
    fields: &[FieldDefinition],
    rows: &[ImportRow],
    mapping: &ColumnMapping,
) -> OptionsToAdd {
    let mut out = OptionsToAdd::new();
    for field in fields.iter().filter(|f| f.is_option_bearing()) {
        let Some(column) = mapping.column_for(&field.key) else {
            continue;
        };
        let values = rows.iter().filter_map(|row| row.get(column));
        let discovered = new_options(field, values);
        if !discovered.is_empty() {
            out.insert(
                field.key.clone(),
                discovered.into_iter().map(FieldOption::from_value).collect(),
            );
        }
    }
    out
}

/// Copy of `fields` with `options` appended to the matching fields.
pub fn apply_options_to_add(fields: &[FieldDefinition], options: &OptionsToAdd) -> Vec<FieldDefinition> {
    fields
        .iter()
        .map(|field| {
            let mut field = field.clone();
            if let Some(extra) = options.get(&field.key) {
                for option in extra {
                    if !field.options.contains_value(&option.value) {
                        field.options.push(option.clone());
                    }
                }
            }
            field
        })
        .collect()
}
