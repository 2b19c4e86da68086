use crate::types::ValueType;

/// Failure to map a tree node back into a model value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueMappingError {
    #[error("failed to map field '{key}': expected {expected}, found {found}")]
    Field {
        key: String,
        expected: &'static str,
        found: ValueType,
    },
    #[error("required field '{key}' is absent")]
    MissingField { key: String },
}
