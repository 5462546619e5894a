//! One pipeline's founder form, investor form and match criteria.
//!
//! The session keeps each compiled validator in step with its schema: every
//! schema change recompiles before the call returns.

use anyhow::{Context, Result, bail};
use pairing_ingest::{
    ColumnInference, ColumnMapping, ImportMapper, ImportOutcome, ImportPreview, ImportRow,
    apply_options_to_add, suggest_column_mapping,
};
use pairing_map::{CompatibilityMatrix, MatchCriteria, compatible_fields, is_compatible};
use pairing_model::{FieldDefinition, FieldSchema, MatchField, MatchFieldPatch, Side};
use pairing_validate::{
    FieldErrors, SchemaValidator, ValidatedData, ValidationMode, compile_schema,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::PairingSettings;
use crate::logging::redact_value;

#[derive(Debug, Clone)]
struct SideState {
    schema: FieldSchema,
    validator: SchemaValidator,
}

impl SideState {
    fn new(schema: FieldSchema) -> Self {
        let validator = compile_schema(&schema, ValidationMode::Submission);
        Self { schema, validator }
    }
}

/// Schemas, validators and criteria for one pipeline.
#[derive(Debug, Clone)]
pub struct PipelineSession {
    settings: PairingSettings,
    founder: SideState,
    investor: SideState,
    criteria: MatchCriteria,
}

impl PipelineSession {
    /// Build a session from both field lists and previously stored criteria.
    pub fn new(
        founder_fields: Vec<FieldDefinition>,
        investor_fields: Vec<FieldDefinition>,
        criteria: MatchCriteria,
        settings: PairingSettings,
    ) -> Result<Self> {
        let founder = FieldSchema::new(founder_fields).context("founder schema")?;
        let investor = FieldSchema::new(investor_fields).context("investor schema")?;
        Ok(Self {
            settings,
            founder: SideState::new(founder),
            investor: SideState::new(investor),
            criteria,
        })
    }

    fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Founder => &self.founder,
            Side::Investor => &self.investor,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Founder => &mut self.founder,
            Side::Investor => &mut self.investor,
        }
    }

    pub fn settings(&self) -> &PairingSettings {
        &self.settings
    }

    pub fn schema(&self, side: Side) -> &FieldSchema {
        &self.side(side).schema
    }

    pub fn validator(&self, side: Side) -> &SchemaValidator {
        &self.side(side).validator
    }

    pub fn criteria(&self) -> &MatchCriteria {
        &self.criteria
    }

    /// Replace one side's fields and recompile its validator.
    pub fn set_schema(&mut self, side: Side, fields: Vec<FieldDefinition>) -> Result<()> {
        let schema =
            FieldSchema::new(fields).with_context(|| format!("{} schema", side.as_str()))?;
        info!(side = side.as_str(), fields = schema.len(), "schema replaced");
        *self.side_mut(side) = SideState::new(schema);
        Ok(())
    }

    /// Validate a new submission against one side's form.
    pub fn validate_submission(
        &self,
        side: Side,
        candidate: &Value,
    ) -> std::result::Result<ValidatedData, FieldErrors> {
        let result = self.side(side).validator.validate(candidate);
        if let Err(errors) = &result {
            for (key, issue) in errors.iter() {
                let raw = candidate.get(key).map(Value::to_string).unwrap_or_default();
                debug!(
                    side = side.as_str(),
                    field = key,
                    issue = issue.code(),
                    value = redact_value(&raw),
                    "submission field rejected"
                );
            }
        }
        result
    }

    /// Full compatibility relation between the two current schemas.
    pub fn compatibility(&self) -> CompatibilityMatrix {
        CompatibilityMatrix::build(self.founder.schema.fields(), self.investor.schema.fields())
    }

    /// Founder fields that carry data and are not mapped yet.
    pub fn available_founder_fields(&self) -> Vec<&FieldDefinition> {
        self.founder
            .schema
            .data_fields()
            .filter(|field| !self.criteria.has_field(&field.key))
            .collect()
    }

    /// Unmapped investor fields compatible with `founder_key`.
    ///
    /// Empty when the key is unknown or nothing fits.
    pub fn compatible_counterparts(&self, founder_key: &str) -> Vec<&FieldDefinition> {
        let Some(founder) = self.founder.schema.get(founder_key) else {
            return Vec::new();
        };
        compatible_fields(founder, self.investor.schema.fields())
            .into_iter()
            .filter(|investor| !self.criteria.has_field(&investor.key))
            .collect()
    }

    /// The counterpart to preselect when exactly one is available.
    pub fn sole_counterpart(&self, founder_key: &str) -> Option<&FieldDefinition> {
        match self.compatible_counterparts(founder_key).as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Pair two fields after checking both exist and are compatible.
    ///
    /// The configured default weight is applied to the new entry.
    pub fn map_fields(&mut self, founder_key: &str, investor_key: &str) -> Result<&MatchField> {
        let Some(founder) = self.founder.schema.get(founder_key) else {
            bail!("unknown founder field '{founder_key}'");
        };
        let Some(investor) = self.investor.schema.get(investor_key) else {
            bail!("unknown investor field '{investor_key}'");
        };
        if !is_compatible(founder, investor) {
            bail!(
                "founder field '{founder_key}' ({}) is not compatible with investor field \
                 '{investor_key}' ({})",
                founder.field_type,
                investor.field_type
            );
        }

        self.criteria.add(founder_key, investor_key)?;
        if let Some(weight) = self.settings.criteria.default_weight {
            self.criteria.edit(
                founder_key,
                investor_key,
                &MatchFieldPatch::default().weight(weight),
            );
        }
        self.criteria
            .get(founder_key)
            .context("mapped field missing after insert")
    }

    /// Update one stored pair; false when the pair does not exist.
    pub fn edit_mapping(
        &mut self,
        founder_key: &str,
        investor_key: &str,
        patch: &MatchFieldPatch,
    ) -> bool {
        self.criteria.edit(founder_key, investor_key, patch)
    }

    pub fn remove_mapping(&mut self, founder_key: &str) -> Option<MatchField> {
        self.criteria.remove(founder_key)
    }

    /// Serialized criteria for persistence.
    pub fn criteria_json(&self) -> Result<String> {
        Ok(self.criteria.to_json()?)
    }

    /// Preview of uploaded rows sized by settings.
    pub fn preview(&self, rows: &[ImportRow]) -> ImportPreview {
        ImportPreview::from_rows(rows, self.settings.import.preview_rows)
    }

    /// Suggested column for each field of `side`, from the headers in `rows`.
    pub fn suggest_mapping(&self, side: Side, rows: &[ImportRow], create_options: bool) -> ColumnMapping {
        let preview = self.preview(rows);
        let inference = ColumnInference::new(&preview).with_create_options(create_options);
        let suggestions = suggest_column_mapping(
            self.side(side).schema.fields(),
            &inference,
            self.settings.import.min_suggestion_confidence,
        );
        debug!(side = side.as_str(), suggested = suggestions.len(), "column suggestions");
        ColumnMapping::from_suggestions(&suggestions)
    }

    /// Import rows into one side.
    ///
    /// In create mode discovered options are appended to the side's schema,
    /// which is then recompiled.
    pub fn import(
        &mut self,
        side: Side,
        rows: &[ImportRow],
        mapping: ColumnMapping,
        create_options: bool,
    ) -> Result<ImportOutcome> {
        let fields = self.side(side).schema.fields().to_vec();
        let mapper = ImportMapper::new(fields, mapping, create_options)?;
        if !rows.is_empty() {
            mapper.ensure_columns(&ImportPreview::from_rows(rows, rows.len()))?;
        }
        let outcome = mapper.run(rows);

        if let Some(options) = &outcome.options_to_add {
            let grown = apply_options_to_add(self.side(side).schema.fields(), options);
            self.set_schema(side, grown)?;
        }
        Ok(outcome)
    }
}
