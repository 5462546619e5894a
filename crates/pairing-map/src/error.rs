//! Error types for match criteria operations.

use std::fmt;

/// Errors from match criteria operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Founder field already has a pairing; the existing one is kept.
    DuplicateMapping {
        founder_field: String,
        existing_investor_field: String,
        rejected_investor_field: String,
    },
    /// Serialized criteria could not be read or written.
    Payload(String),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateMapping {
                founder_field,
                existing_investor_field,
                rejected_investor_field,
            } => write!(
                f,
                "Founder field '{founder_field}' is already mapped to '{existing_investor_field}' \
                 (rejected '{rejected_investor_field}')"
            ),
            Self::Payload(message) => write!(f, "Invalid match criteria payload: {message}"),
        }
    }
}

impl std::error::Error for MappingError {}

impl From<serde_json::Error> for MappingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}
