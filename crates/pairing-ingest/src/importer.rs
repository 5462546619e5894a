//! End-to-end import: transform, grow options, validate.

use pairing_model::FieldDefinition;
use pairing_validate::{FieldErrors, ValidationMode, compile};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::discovery::{OptionsToAdd, apply_options_to_add, collect_options_to_add};
use crate::error::{IngestError, Result};
use crate::preview::{ImportPreview, ImportRow};
use crate::transform::{ColumnMapping, transform_row};

/// A row that failed validation after transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRow {
    /// Zero-based index into the imported rows.
    pub row: usize,
    pub errors: FieldErrors,
}

/// Result of one import run.
///
/// Serializes as the import payload `{submissions, optionsToAdd?}` plus the
/// rejected rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub submissions: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_to_add: Option<OptionsToAdd>,
    #[serde(default)]
    pub rejected: Vec<RejectedRow>,
}

impl ImportOutcome {
    pub fn accepted(&self) -> usize {
        self.submissions.len()
    }
}

/// Import driver for one target schema and one column mapping.
#[derive(Debug, Clone)]
pub struct ImportMapper {
    fields: Vec<FieldDefinition>,
    mapping: ColumnMapping,
    create_options: bool,
}

impl ImportMapper {
    /// Check that every mapped key names a data-carrying field.
    pub fn new(
        fields: Vec<FieldDefinition>,
        mapping: ColumnMapping,
        create_options: bool,
    ) -> Result<Self> {
        for (key, _) in mapping.mapped() {
            let Some(field) = fields.iter().find(|f| f.key == key) else {
                return Err(IngestError::UnknownField {
                    key: key.to_string(),
                });
            };
            if !field.carries_data() {
                return Err(IngestError::NotImportable {
                    key: key.to_string(),
                    field_type: field.field_type.to_string(),
                });
            }
        }
        Ok(Self {
            fields,
            mapping,
            create_options,
        })
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn create_options(&self) -> bool {
        self.create_options
    }

    /// Fail on the first mapped column missing from the preview headers.
    pub fn ensure_columns(&self, preview: &ImportPreview) -> Result<()> {
        match self
            .mapping
            .mapped()
            .find(|(_, column)| !preview.has_column(column))
        {
            Some((key, column)) => Err(IngestError::UnknownColumn {
                key: key.to_string(),
                column: column.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Transform and validate every row.
    ///
    /// In create mode new option values are discovered first and the rows are
    /// transformed and validated against the grown field list, so the result
    /// is consistent with the schema the caller will persist.
    pub fn run(&self, rows: &[ImportRow]) -> ImportOutcome {
        let (fields, options_to_add) = if self.create_options {
            let discovered = collect_options_to_add(&self.fields, rows, &self.mapping);
            debug!(
                fields = discovered.len(),
                options = discovered.values().map(Vec::len).sum::<usize>(),
                "discovered new options"
            );
            let grown = apply_options_to_add(&self.fields, &discovered);
            (grown, (!discovered.is_empty()).then_some(discovered))
        } else {
            (self.fields.clone(), None)
        };

        let validator = compile(&fields, ValidationMode::Import);
        let mut outcome = ImportOutcome {
            options_to_add,
            ..ImportOutcome::default()
        };

        for (index, row) in rows.iter().enumerate() {
            let transformed: Map<String, Value> =
                transform_row(&fields, row, &self.mapping, self.create_options);
            match validator.validate_map(&transformed) {
                Ok(data) => outcome.submissions.push(data.into_value()),
                Err(errors) => {
                    debug!(row = index, errors = errors.len(), "import row rejected");
                    outcome.rejected.push(RejectedRow { row: index, errors });
                }
            }
        }

        info!(
            rows = rows.len(),
            accepted = outcome.submissions.len(),
            rejected = outcome.rejected.len(),
            create_options = self.create_options,
            "import complete"
        );
        outcome
    }
}
