use thiserror::Error;

/// Structural problems detected while assembling a field schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("field key must not be empty (label: '{label}')")]
    EmptyKey { label: String },
    #[error("duplicate field key '{key}'")]
    DuplicateKey { key: String },
    #[error("field '{key}' has duplicate option value '{value}'")]
    DuplicateOptionValue { key: String, value: String },
    #[error("field '{key}' has numeric bounds with min {min} greater than max {max}")]
    InvertedBounds { key: String, min: f64, max: f64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
