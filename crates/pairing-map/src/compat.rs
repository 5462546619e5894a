//! Structural compatibility between founder and investor fields.
//!
//! Two fields may be paired when:
//! - both are option-bearing (select, radio, multiselect) and their option
//!   `value` sets are equal, ignoring labels and order. The concrete subtype
//!   does not matter, so a `select` pairs with a `multiselect` over the same
//!   options.
//! - otherwise, both have the same type.
//!
//! `button` fields never pair. Unknown types only pair with the same unknown
//! type name.
//!
//! The relation is symmetric.

use std::collections::BTreeMap;

use pairing_model::{FieldDefinition, FieldType};

/// Whether two fields may be paired for matching.
pub fn is_compatible(a: &FieldDefinition, b: &FieldDefinition) -> bool {
    match (&a.field_type, &b.field_type) {
        (FieldType::Button, _) | (_, FieldType::Button) => false,
        (x, y) if x.is_option_bearing() && y.is_option_bearing() => {
            a.options.value_set() == b.options.value_set()
        }
        (FieldType::Unknown(x), FieldType::Unknown(y)) => x.eq_ignore_ascii_case(y),
        (FieldType::Unknown(_), _) | (_, FieldType::Unknown(_)) => false,
        (x, y) => x == y,
    }
}

/// Candidates compatible with `field`, in candidate order.
///
/// An empty result means the field has no counterpart and its picker should be
/// disabled. When exactly one candidate remains, callers may auto-select it.
pub fn compatible_fields<'a>(
    field: &FieldDefinition,
    candidates: &'a [FieldDefinition],
) -> Vec<&'a FieldDefinition> {
    candidates
        .iter()
        .filter(|candidate| is_compatible(field, candidate))
        .collect()
}

/// The full compatibility relation between two schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityMatrix {
    by_founder: BTreeMap<String, Vec<String>>,
    by_investor: BTreeMap<String, Vec<String>>,
}

impl CompatibilityMatrix {
    pub fn build(founders: &[FieldDefinition], investors: &[FieldDefinition]) -> Self {
        let mut matrix = Self::default();
        for founder in founders.iter().filter(|f| f.carries_data()) {
            let compatible: Vec<String> = compatible_fields(founder, investors)
                .into_iter()
                .map(|investor| investor.key.clone())
                .collect();
            for investor in &compatible {
                matrix
                    .by_investor
                    .entry(investor.clone())
                    .or_default()
                    .push(founder.key.clone());
            }
            matrix.by_founder.insert(founder.key.clone(), compatible);
        }
        for investor in investors.iter().filter(|f| f.carries_data()) {
            matrix.by_investor.entry(investor.key.clone()).or_default();
        }
        matrix
    }

    /// Investor keys compatible with a founder field.
    pub fn for_founder(&self, founder_key: &str) -> &[String] {
        self.by_founder.get(founder_key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Founder keys compatible with an investor field.
    pub fn for_investor(&self, investor_key: &str) -> &[String] {
        self.by_investor.get(investor_key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_pair(&self, founder_key: &str, investor_key: &str) -> bool {
        self.for_founder(founder_key)
            .iter()
            .any(|key| key == investor_key)
    }

    /// Founder fields without any compatible investor field.
    pub fn unmatched_founders(&self) -> Vec<&str> {
        self.by_founder
            .iter()
            .filter(|(_, investors)| investors.is_empty())
            .map(|(key, _)| key.as_str())
            .collect()
    }

    pub fn pair_count(&self) -> usize {
        self.by_founder.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use pairing_model::FieldOption;

    use super::*;

    #[test]
    fn empty_option_sets_pair_with_each_other() {
        let a = FieldDefinition::new("a", "A", FieldType::Select);
        let b = FieldDefinition::new("b", "B", FieldType::Radio);
        let c = FieldDefinition::new("c", "C", FieldType::Select)
            .with_options(vec![FieldOption::from_value("x")]);
        assert!(is_compatible(&a, &b));
        assert!(!is_compatible(&a, &c));
    }

    #[test]
    fn option_bearing_never_pairs_with_scalar() {
        let select = FieldDefinition::new("a", "A", FieldType::Select);
        let text = FieldDefinition::new("b", "B", FieldType::Text);
        assert!(!is_compatible(&select, &text));
    }
}
