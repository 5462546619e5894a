//! Match criteria bookkeeping for one pipeline.
//!
//! The store is an ordered list of [`MatchField`] pairings with one rule: a
//! founder field is mapped at most once. Investor fields may appear in any
//! number of pairings. Whether the referenced keys exist in the live schemas is
//! the caller's concern.

use pairing_model::{MatchField, MatchFieldPatch, normalize_weight};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MappingError;

/// Ordered, owned set of field pairings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MatchField>", into = "Vec<MatchField>")]
pub struct MatchCriteria {
    fields: Vec<MatchField>,
}

impl MatchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted entries, re-checking founder uniqueness.
    ///
    /// Weights are normalized into [0, 1].
    pub fn from_fields(fields: Vec<MatchField>) -> Result<Self, MappingError> {
        let mut criteria = Self::new();
        for mut field in fields {
            if let Some(existing) = criteria.get(&field.founder_field) {
                return Err(MappingError::DuplicateMapping {
                    founder_field: field.founder_field.clone(),
                    existing_investor_field: existing.investor_field.clone(),
                    rejected_investor_field: field.investor_field,
                });
            }
            field.weight = field.weight.and_then(normalize_weight);
            criteria.fields.push(field);
        }
        Ok(criteria)
    }

    /// Parse the JSON array payload.
    pub fn from_json(payload: &str) -> Result<Self, MappingError> {
        let fields: Vec<MatchField> = serde_json::from_str(payload)?;
        Self::from_fields(fields)
    }

    /// Serialize to the JSON array payload.
    pub fn to_json(&self) -> Result<String, MappingError> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    /// Pair a founder field with an investor field.
    ///
    /// The first pairing for a founder field wins: a second `add` for the same
    /// founder field returns [`MappingError::DuplicateMapping`] and leaves the
    /// existing entry untouched. New entries are exact, unweighted and optional.
    pub fn add(&mut self, founder_field: &str, investor_field: &str) -> Result<&MatchField, MappingError> {
        if let Some(existing) = self.get(founder_field) {
            debug!(
                founder_field,
                existing = %existing.investor_field,
                rejected = investor_field,
                "founder field already mapped"
            );
            return Err(MappingError::DuplicateMapping {
                founder_field: founder_field.to_string(),
                existing_investor_field: existing.investor_field.clone(),
                rejected_investor_field: investor_field.to_string(),
            });
        }
        debug!(founder_field, investor_field, "added match field");
        let index = self.fields.len();
        self.fields.push(MatchField::new(founder_field, investor_field));
        Ok(&self.fields[index])
    }

    /// Merge `patch` into the pairing `(founder_field, investor_field)`.
    ///
    /// Returns `false` without changing anything when no such pairing exists,
    /// for instance after a concurrent removal.
    pub fn edit(&mut self, founder_field: &str, investor_field: &str, patch: &MatchFieldPatch) -> bool {
        match self
            .fields
            .iter_mut()
            .find(|f| f.pairs(founder_field, investor_field))
        {
            Some(field) => {
                field.apply(patch);
                debug!(founder_field, investor_field, "edited match field");
                true
            }
            None => {
                debug!(founder_field, investor_field, "no match field to edit");
                false
            }
        }
    }

    /// Remove the pairing for a founder field, returning it if present.
    pub fn remove(&mut self, founder_field: &str) -> Option<MatchField> {
        let index = self
            .fields
            .iter()
            .position(|f| f.founder_field == founder_field)?;
        debug!(founder_field, "removed match field");
        Some(self.fields.remove(index))
    }

    /// True if `key` is used as a founder or investor field in any pairing.
    pub fn has_field(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.references(key))
    }

    pub fn get(&self, founder_field: &str) -> Option<&MatchField> {
        self.fields.iter().find(|f| f.founder_field == founder_field)
    }

    pub fn fields(&self) -> &[MatchField] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Pairings flagged as required.
    pub fn required_fields(&self) -> impl Iterator<Item = &MatchField> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn into_fields(self) -> Vec<MatchField> {
        self.fields
    }
}

impl TryFrom<Vec<MatchField>> for MatchCriteria {
    type Error = MappingError;

    fn try_from(fields: Vec<MatchField>) -> Result<Self, Self::Error> {
        Self::from_fields(fields)
    }
}

impl From<MatchCriteria> for Vec<MatchField> {
    fn from(criteria: MatchCriteria) -> Self {
        criteria.fields
    }
}

impl<'a> IntoIterator for &'a MatchCriteria {
    type Item = &'a MatchField;
    type IntoIter = std::slice::Iter<'a, MatchField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
