//! Type discriminants shared by every node and codec.

use std::fmt;

/// Discriminant of a [`Value`](crate::Value) node.
///
/// The declaration order defines the ordinals persisted by the tuple codec,
/// so variants must only ever be appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Entity,
    Array,
    Binary,
    Map,
    StringParametersMap,
    Xml,
    String,
    Int,
    Long,
    Double,
    Float,
    Bool,
    Byte,
    Short,
    Char,
}

impl ValueType {
    pub const ALL: [ValueType; 15] = [
        ValueType::Entity,
        ValueType::Array,
        ValueType::Binary,
        ValueType::Map,
        ValueType::StringParametersMap,
        ValueType::Xml,
        ValueType::String,
        ValueType::Int,
        ValueType::Long,
        ValueType::Double,
        ValueType::Float,
        ValueType::Bool,
        ValueType::Byte,
        ValueType::Short,
        ValueType::Char,
    ];

    /// Stable ordinal used by the tuple codec.
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// Inverse of [`ValueType::ordinal`].
    pub fn from_ordinal(ordinal: i64) -> Option<ValueType> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn is_primitive(self) -> bool {
        self.primitive_type().is_some()
    }

    /// Scalar kind of a primitive discriminant, `None` for structural types.
    pub fn primitive_type(self) -> Option<PrimitiveType> {
        match self {
            ValueType::String => Some(PrimitiveType::String),
            ValueType::Int => Some(PrimitiveType::Int),
            ValueType::Long => Some(PrimitiveType::Long),
            ValueType::Double => Some(PrimitiveType::Double),
            ValueType::Float => Some(PrimitiveType::Float),
            ValueType::Bool => Some(PrimitiveType::Bool),
            ValueType::Byte => Some(PrimitiveType::Byte),
            ValueType::Short => Some(PrimitiveType::Short),
            ValueType::Char => Some(PrimitiveType::Char),
            ValueType::Entity
            | ValueType::Array
            | ValueType::Binary
            | ValueType::Map
            | ValueType::StringParametersMap
            | ValueType::Xml => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueType::Entity => "ENTITY",
            ValueType::Array => "ARRAY",
            ValueType::Binary => "BINARY",
            ValueType::Map => "MAP",
            ValueType::StringParametersMap => "STRING_PARAMETERS_MAP",
            ValueType::Xml => "XML",
            ValueType::String => "STRING",
            ValueType::Int => "INT",
            ValueType::Long => "LONG",
            ValueType::Double => "DOUBLE",
            ValueType::Float => "FLOAT",
            ValueType::Bool => "BOOL",
            ValueType::Byte => "BYTE",
            ValueType::Short => "SHORT",
            ValueType::Char => "CHAR",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar kind of a [`Primitive`](crate::Primitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Int,
    Long,
    Double,
    Float,
    Bool,
    Byte,
    Short,
    Char,
}

impl From<PrimitiveType> for ValueType {
    fn from(kind: PrimitiveType) -> Self {
        match kind {
            PrimitiveType::String => ValueType::String,
            PrimitiveType::Int => ValueType::Int,
            PrimitiveType::Long => ValueType::Long,
            PrimitiveType::Double => ValueType::Double,
            PrimitiveType::Float => ValueType::Float,
            PrimitiveType::Bool => ValueType::Bool,
            PrimitiveType::Byte => ValueType::Byte,
            PrimitiveType::Short => ValueType::Short,
            PrimitiveType::Char => ValueType::Char,
        }
    }
}

/// Storage mode of an [`ArrayValue`](crate::ArrayValue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionMode {
    /// Dense, unboxed scalars of a single primitive kind.
    PrimitiveArray,
    /// Boxed [`Value`](crate::Value) elements.
    Collection,
}

/// Declared element type of an [`ArrayValue`](crate::ArrayValue).
///
/// `Value` marks a heterogeneous collection whose elements must be
/// dispatched one by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementsType {
    Entity,
    Array,
    Binary,
    Map,
    StringParametersMap,
    String,
    Int,
    Long,
    Double,
    Float,
    Bool,
    Byte,
    Short,
    Char,
    Value,
}

impl ElementsType {
    /// Element type matching a node discriminant. XML nodes are not values,
    /// so they fall back to the mixed `Value` type.
    pub fn of(value_type: ValueType) -> ElementsType {
        match value_type {
            ValueType::Entity => ElementsType::Entity,
            ValueType::Array => ElementsType::Array,
            ValueType::Binary => ElementsType::Binary,
            ValueType::Map => ElementsType::Map,
            ValueType::StringParametersMap => ElementsType::StringParametersMap,
            ValueType::String => ElementsType::String,
            ValueType::Int => ElementsType::Int,
            ValueType::Long => ElementsType::Long,
            ValueType::Double => ElementsType::Double,
            ValueType::Float => ElementsType::Float,
            ValueType::Bool => ElementsType::Bool,
            ValueType::Byte => ElementsType::Byte,
            ValueType::Short => ElementsType::Short,
            ValueType::Char => ElementsType::Char,
            ValueType::Xml => ElementsType::Value,
        }
    }

    /// Node discriminant of the declared element type, `None` for `Value`.
    pub fn value_type(self) -> Option<ValueType> {
        match self {
            ElementsType::Entity => Some(ValueType::Entity),
            ElementsType::Array => Some(ValueType::Array),
            ElementsType::Binary => Some(ValueType::Binary),
            ElementsType::Map => Some(ValueType::Map),
            ElementsType::StringParametersMap => Some(ValueType::StringParametersMap),
            ElementsType::String => Some(ValueType::String),
            ElementsType::Int => Some(ValueType::Int),
            ElementsType::Long => Some(ValueType::Long),
            ElementsType::Double => Some(ValueType::Double),
            ElementsType::Float => Some(ValueType::Float),
            ElementsType::Bool => Some(ValueType::Bool),
            ElementsType::Byte => Some(ValueType::Byte),
            ElementsType::Short => Some(ValueType::Short),
            ElementsType::Char => Some(ValueType::Char),
            ElementsType::Value => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_are_positional() {
        for (index, value_type) in ValueType::ALL.iter().enumerate() {
            assert_eq!(value_type.ordinal() as usize, index);
            assert_eq!(ValueType::from_ordinal(index as i64), Some(*value_type));
        }
        assert_eq!(ValueType::Entity.ordinal(), 0);
        assert_eq!(ValueType::String.ordinal(), 6);
        assert_eq!(ValueType::Char.ordinal(), 14);
    }

    #[test]
    fn unknown_ordinals_are_rejected() {
        assert_eq!(ValueType::from_ordinal(-1), None);
        assert_eq!(ValueType::from_ordinal(15), None);
    }

    #[test]
    fn primitive_discriminants() {
        assert!(ValueType::Long.is_primitive());
        assert!(!ValueType::Entity.is_primitive());
        assert_eq!(
            ValueType::from(PrimitiveType::Short),
            ValueType::Short
        );
        assert_eq!(ElementsType::of(ValueType::Xml), ElementsType::Value);
        assert_eq!(ElementsType::Value.value_type(), None);
    }
}
