//! Column mapping suggestions.
//!
//! Headers are scored against each field's key and label with Jaro-Winkler
//! similarity. Only type-compatible columns are candidates, and the assignment
//! is one-to-one: the best remaining score is taken first.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use pairing_model::FieldDefinition;
use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use serde::{Deserialize, Serialize};

use crate::hints::ColumnInference;
use crate::transform::ColumnMapping;

/// Default minimum similarity for a suggestion.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.8;

/// A suggested source column for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSuggestion {
    pub field_key: String,
    pub column: String,
    /// Similarity score (0.0 to 1.0).
    pub confidence: f32,
}

/// Lowercase and replace separators with single spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn score(column: &str, field: &FieldDefinition) -> f32 {
    let column = normalize_text(column);
    let by_key = jaro_similarity(column.chars(), normalize_text(&field.key).chars());
    let by_label = if field.label.trim().is_empty() {
        0.0
    } else {
        jaro_similarity(column.chars(), normalize_text(&field.label).chars())
    };
    by_key.max(by_label) as f32
}

/// Suggest a column for each field whose best compatible header scores at
/// least `min_confidence`.
pub fn suggest_column_mapping(
    fields: &[FieldDefinition],
    inference: &ColumnInference<'_>,
    min_confidence: f32,
) -> Vec<ColumnSuggestion> {
    let mut candidates: Vec<ColumnSuggestion> = Vec::new();
    for field in fields.iter().filter(|f| f.carries_data()) {
        for column in inference.compatible_columns(field) {
            let confidence = score(column, field);
            if confidence >= min_confidence {
                candidates.push(ColumnSuggestion {
                    field_key: field.key.clone(),
                    column: column.to_string(),
                    confidence,
                });
            }
        }
    }

    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.field_key.cmp(&b.field_key))
    });

    let mut assigned_fields = BTreeSet::new();
    let mut assigned_columns = BTreeSet::new();
    let mut suggestions = Vec::new();
    for candidate in candidates {
        if assigned_fields.contains(&candidate.field_key)
            || assigned_columns.contains(&candidate.column)
        {
            continue;
        }
        assigned_fields.insert(candidate.field_key.clone());
        assigned_columns.insert(candidate.column.clone());
        suggestions.push(candidate);
    }
    suggestions
}

impl ColumnMapping {
    /// Mapping built from accepted suggestions.
    pub fn from_suggestions(suggestions: &[ColumnSuggestion]) -> Self {
        suggestions
            .iter()
            .map(|s| (s.field_key.clone(), s.column.clone()))
            .collect()
    }
}
