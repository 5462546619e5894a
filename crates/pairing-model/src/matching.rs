//! Match criteria types: one stored pairing between a founder field and an
//! investor field.

use serde::{Deserialize, Serialize};

/// How an external scorer compares the two paired values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Values must be identical.
    #[default]
    Exact,
    /// Values contribute a similarity score.
    Soft,
}

/// A pairing between one founder field and one investor field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchField {
    pub founder_field: String,
    pub investor_field: String,
    #[serde(default)]
    pub match_type: MatchType,
    /// Relative importance in [0, 1]; `None` until the user sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// A non-match on a required pairing disqualifies the candidate pair.
    #[serde(default)]
    pub required: bool,
}

impl MatchField {
    /// New exact, optional pairing with no weight.
    pub fn new(founder_field: impl Into<String>, investor_field: impl Into<String>) -> Self {
        Self {
            founder_field: founder_field.into(),
            investor_field: investor_field.into(),
            match_type: MatchType::Exact,
            weight: None,
            required: false,
        }
    }

    pub fn pairs(&self, founder_field: &str, investor_field: &str) -> bool {
        self.founder_field == founder_field && self.investor_field == investor_field
    }

    pub fn references(&self, key: &str) -> bool {
        self.founder_field == key || self.investor_field == key
    }

    /// Merge the fields present in `patch`.
    pub fn apply(&mut self, patch: &MatchFieldPatch) {
        if let Some(match_type) = patch.match_type {
            self.match_type = match_type;
        }
        if let Some(weight) = patch.weight {
            self.weight = normalize_weight(weight);
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
    }
}

/// Partial update for a [`MatchField`]; `None` leaves a property untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFieldPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl MatchFieldPatch {
    #[must_use]
    pub fn match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = Some(match_type);
        self
    }

    #[must_use]
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.match_type.is_none() && self.weight.is_none() && self.required.is_none()
    }
}

/// Clamp a weight into [0, 1]; non-finite weights become `None`.
pub fn normalize_weight(weight: f64) -> Option<f64> {
    weight.is_finite().then(|| weight.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_leaves_absent_properties() {
        let mut field = MatchField::new("stage", "target_stage");
        field.apply(&MatchFieldPatch::default().weight(0.4));
        assert_eq!(field.weight, Some(0.4));
        assert_eq!(field.match_type, MatchType::Exact);
        assert!(!field.required);

        field.apply(&MatchFieldPatch::default().match_type(MatchType::Soft));
        assert_eq!(field.weight, Some(0.4));
        assert_eq!(field.match_type, MatchType::Soft);
    }

    #[test]
    fn weights_are_clamped() {
        assert_eq!(normalize_weight(1.7), Some(1.0));
        assert_eq!(normalize_weight(-0.2), Some(0.0));
        assert_eq!(normalize_weight(f64::NAN), None);
    }
}
