//! Schema compilation.
//!
//! A field list is compiled once into a [`SchemaValidator`]; the validator is
//! then applied to every candidate submission for that schema.
//!
//! ## Rules
//!
//! - **required**: missing, null, empty string or empty list fails, whatever the type;
//!   a string of only whitespace counts as empty
//! - **optional and empty**: missing or null is skipped; `""` is kept only for
//!   text-like fields and `[]` only for multiselect, any other empty shape goes
//!   through the type check
//! - **text / textarea / date / file**: string
//! - **email / url / phone**: string with matching syntax
//! - **number**: finite number (JSON number or numeric string), inside bounds
//! - **select / radio**: one option `value`
//! - **multiselect**: list of option `value`s
//! - **checkbox**: boolean; canonical tokens also accepted in [`ValidationMode::Import`]
//! - **button**: skipped
//!
//! Every failing field is reported; validation never stops at the first error.

use pairing_model::{FieldDefinition, FieldSchema, FieldType, NumericBounds, OptionSet};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::checks::{self, TextFormat};
use crate::format::is_blank;
use crate::issue::{FieldErrors, FieldIssue};

/// Context the validator runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Direct form submission: strict booleans.
    #[default]
    Submission,
    /// Imported rows: booleans may arrive as `yes`/`no`/`1`/`0` tokens.
    Import,
}

#[derive(Debug, Clone)]
pub(crate) enum RuleKind {
    Text(TextFormat),
    Number(Option<NumericBounds>),
    Single(OptionSet),
    Multi(OptionSet),
    Checkbox,
    /// Field type without a rule; any value is accepted.
    Opaque,
}

impl RuleKind {
    /// Whether a blank `value` is the empty form of this type.
    fn accepts_empty(&self, value: &Value) -> bool {
        match (self, value) {
            (RuleKind::Opaque, _) => true,
            (RuleKind::Text(_), Value::String(_)) => true,
            (RuleKind::Multi(_), Value::Array(_)) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
struct FieldRule {
    key: String,
    required: bool,
    kind: RuleKind,
}

/// Values that passed validation, restricted to the schema's keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedData {
    values: Map<String, Value>,
}

impl ValidatedData {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

/// Runtime validator compiled from a field list.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    rules: Vec<FieldRule>,
    mode: ValidationMode,
    unhandled: Vec<String>,
}

/// Compile a field list into a validator.
pub fn compile(fields: &[FieldDefinition], mode: ValidationMode) -> SchemaValidator {
    let mut rules = Vec::with_capacity(fields.len());
    let mut unhandled = Vec::new();

    for field in fields {
        let kind = match &field.field_type {
            FieldType::Button => continue,
            FieldType::Text | FieldType::Textarea | FieldType::Date | FieldType::File => {
                RuleKind::Text(TextFormat::Plain)
            }
            FieldType::Email => RuleKind::Text(TextFormat::Email),
            FieldType::Url => RuleKind::Text(TextFormat::Url),
            FieldType::Phone => RuleKind::Text(TextFormat::Phone),
            FieldType::Number => RuleKind::Number(field.numeric_bounds),
            FieldType::Select | FieldType::Radio => RuleKind::Single(field.options.clone()),
            FieldType::MultiSelect => RuleKind::Multi(field.options.clone()),
            FieldType::Checkbox => RuleKind::Checkbox,
            FieldType::Unknown(name) => {
                warn!(
                    field = %field.key,
                    field_type = %name,
                    "no validation rule for field type, accepting any value"
                );
                unhandled.push(field.key.clone());
                RuleKind::Opaque
            }
        };
        rules.push(FieldRule {
            key: field.key.clone(),
            required: field.required,
            kind,
        });
    }

    debug!(fields = rules.len(), mode = ?mode, "compiled schema validator");

    SchemaValidator {
        rules,
        mode,
        unhandled,
    }
}

/// Compile a checked schema.
pub fn compile_schema(schema: &FieldSchema, mode: ValidationMode) -> SchemaValidator {
    compile(schema.fields(), mode)
}

impl SchemaValidator {
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Keys of fields whose type had no rule and accept any value.
    pub fn unhandled_types(&self) -> &[String] {
        &self.unhandled
    }

    /// Number of fields the validator checks (buttons excluded).
    pub fn field_count(&self) -> usize {
        self.rules.len()
    }

    /// Validate a candidate submission object.
    ///
    /// A non-object candidate is treated as an empty object. Keys outside the
    /// schema are dropped from the returned data.
    pub fn validate(&self, candidate: &Value) -> Result<ValidatedData, FieldErrors> {
        match candidate {
            Value::Object(map) => self.validate_map(map),
            _ => self.validate_map(&Map::new()),
        }
    }

    pub fn validate_map(&self, candidate: &Map<String, Value>) -> Result<ValidatedData, FieldErrors> {
        let mut values = Map::new();
        let mut errors = FieldErrors::new();

        for rule in &self.rules {
            let value = candidate.get(&rule.key).unwrap_or(&Value::Null);

            if is_blank(value) {
                if rule.required {
                    errors.insert(rule.key.clone(), FieldIssue::Required);
                    continue;
                }
                if value.is_null() {
                    continue;
                }
                if rule.kind.accepts_empty(value) {
                    values.insert(rule.key.clone(), value.clone());
                    continue;
                }
            }

            match checks::check(&rule.kind, value, self.mode) {
                Ok(stored) => {
                    values.insert(rule.key.clone(), stored);
                }
                Err(issue) => errors.insert(rule.key.clone(), issue),
            }
        }

        if errors.is_empty() {
            Ok(ValidatedData { values })
        } else {
            debug!(invalid = errors.len(), "candidate failed validation");
            Err(errors)
        }
    }
}
