use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::options::{FieldOption, OptionSet};

/// Which population a schema collects data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Founder,
    Investor,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Founder => Side::Investor,
            Side::Investor => Side::Founder,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Founder => "founder",
            Side::Investor => "investor",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input type of a form field.
///
/// The set is closed; type names outside it are preserved in
/// [`FieldType::Unknown`] so the field survives a load/save round trip.
/// Consumers must give `Unknown` an explicit branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Textarea,
    Select,
    /// Multiple choice (`selectboxes` in form builders).
    MultiSelect,
    Radio,
    Checkbox,
    Date,
    File,
    Url,
    Phone,
    /// Carries no data; excluded from validation, matching and import.
    Button,
    Unknown(String),
}

impl FieldType {
    /// Canonical type name used in serialized schemas.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::MultiSelect => "multiselect",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
            FieldType::File => "file",
            FieldType::Url => "url",
            FieldType::Phone => "phone",
            FieldType::Button => "button",
            FieldType::Unknown(name) => name,
        }
    }

    /// Parse a type name, accepting the aliases form builders emit.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" | "textfield" => FieldType::Text,
            "email" => FieldType::Email,
            "number" => FieldType::Number,
            "textarea" => FieldType::Textarea,
            "select" => FieldType::Select,
            "multiselect" | "selectboxes" | "select-boxes" => FieldType::MultiSelect,
            "radio" => FieldType::Radio,
            "checkbox" => FieldType::Checkbox,
            "date" | "datetime" => FieldType::Date,
            "file" => FieldType::File,
            "url" => FieldType::Url,
            "phone" | "phonenumber" => FieldType::Phone,
            "button" => FieldType::Button,
            _ => FieldType::Unknown(name.trim().to_string()),
        }
    }

    /// True for select, radio and multiselect.
    pub fn is_option_bearing(&self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Radio | FieldType::MultiSelect
        )
    }

    /// False only for `button`.
    pub fn carries_data(&self) -> bool {
        !matches!(self, FieldType::Button)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FieldType::Unknown(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(FieldType::from_name(s))
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        FieldType::from_name(&name)
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

/// Numeric constraints for `number` fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Input granularity hint; not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl NumericBounds {
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            step: None,
        }
    }

    /// Inclusive containment; an unset side is unbounded.
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// One question on a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Stable identifier, unique within its schema.
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "OptionSet::is_empty")]
    pub options: OptionSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_bounds: Option<NumericBounds>,
    /// Scored by an external collaborator; opaque here.
    #[serde(default)]
    pub is_personality_derived: bool,
}

impl FieldDefinition {
    pub fn new(key: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            field_type,
            required: false,
            options: OptionSet::default(),
            numeric_bounds: None,
            is_personality_derived: false,
        }
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = OptionSet::new(options);
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: NumericBounds) -> Self {
        self.numeric_bounds = Some(bounds);
        self
    }

    #[must_use]
    pub fn with_personality_derived(mut self, derived: bool) -> Self {
        self.is_personality_derived = derived;
        self
    }

    pub fn is_option_bearing(&self) -> bool {
        self.field_type.is_option_bearing()
    }

    pub fn carries_data(&self) -> bool {
        self.field_type.carries_data()
    }
}

/// Ordered field list for one side, with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldDefinition>", into = "Vec<FieldDefinition>")]
pub struct FieldSchema {
    fields: Vec<FieldDefinition>,
}

impl FieldSchema {
    /// Build a schema, checking key and option-value uniqueness.
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self> {
        let mut keys = BTreeSet::new();
        for field in &fields {
            if field.key.trim().is_empty() {
                return Err(ModelError::EmptyKey {
                    label: field.label.clone(),
                });
            }
            if !keys.insert(field.key.as_str()) {
                return Err(ModelError::DuplicateKey {
                    key: field.key.clone(),
                });
            }
            if let Some(value) = field.options.duplicate_value() {
                return Err(ModelError::DuplicateOptionValue {
                    key: field.key.clone(),
                    value: value.to_string(),
                });
            }
            if let Some(NumericBounds {
                min: Some(min),
                max: Some(max),
                ..
            }) = field.numeric_bounds
                && min > max
            {
                return Err(ModelError::InvertedBounds {
                    key: field.key.clone(),
                    min,
                    max,
                });
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDefinition> {
        self.fields.iter()
    }

    pub fn get(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Fields that carry data (everything except buttons).
    pub fn data_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.carries_data())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Vec<FieldDefinition> {
        self.fields
    }
}

impl TryFrom<Vec<FieldDefinition>> for FieldSchema {
    type Error = ModelError;

    fn try_from(fields: Vec<FieldDefinition>) -> Result<Self> {
        Self::new(fields)
    }
}

impl From<FieldSchema> for Vec<FieldDefinition> {
    fn from(schema: FieldSchema) -> Self {
        schema.fields
    }
}

impl<'a> IntoIterator for &'a FieldSchema {
    type Item = &'a FieldDefinition;
    type IntoIter = std::slice::Iter<'a, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
