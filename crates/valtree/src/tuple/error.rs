use crate::types::ValueType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaMappingError {
    #[error("unknown value type ordinal: {0}")]
    UnknownOrdinal(i64),
    #[error("value type {0} has no tuple form")]
    UnsupportedType(ValueType),
    #[error("malformed schema tuple: {0}")]
    Malformed(&'static str),
    #[error("data tuple does not match schema: expected {expected}")]
    DataMismatch { expected: ValueType },
}
