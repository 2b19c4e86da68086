//! Scalar leaf values.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::types::{PrimitiveType, ValueType};

/// An immutable scalar of one of the nine primitive kinds.
///
/// Primitives double as [`Entity`](crate::Entity) keys, so equality and
/// hashing are kind-sensitive (`Int(3) != Long(3)`) and floating values are
/// compared by bit pattern.
#[derive(Debug, Clone)]
pub enum Primitive {
    String(String),
    Int(i32),
    Long(i64),
    Double(f64),
    Float(f32),
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(char),
}

impl Primitive {
    pub fn primitive_type(&self) -> PrimitiveType {
        match self {
            Primitive::String(_) => PrimitiveType::String,
            Primitive::Int(_) => PrimitiveType::Int,
            Primitive::Long(_) => PrimitiveType::Long,
            Primitive::Double(_) => PrimitiveType::Double,
            Primitive::Float(_) => PrimitiveType::Float,
            Primitive::Bool(_) => PrimitiveType::Bool,
            Primitive::Byte(_) => PrimitiveType::Byte,
            Primitive::Short(_) => PrimitiveType::Short,
            Primitive::Char(_) => PrimitiveType::Char,
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.primitive_type().into()
    }

    /// Only an empty string counts as empty; zero and `false` are values.
    pub fn is_empty(&self) -> bool {
        matches!(self, Primitive::String(s) if s.is_empty())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Primitive::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of INT, LONG, SHORT and BYTE primitives.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Primitive::Int(v) => Some(v.into()),
            Primitive::Long(v) => Some(v),
            Primitive::Short(v) => Some(v.into()),
            Primitive::Byte(v) => Some(v.into()),
            _ => None,
        }
    }

    /// INT primitives, plus narrower kinds and in-range LONG values.
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Primitive::Int(v) => Some(v),
            Primitive::Short(v) => Some(v.into()),
            Primitive::Byte(v) => Some(v.into()),
            Primitive::Long(v) => i32::try_from(v).ok(),
            _ => None,
        }
    }

    /// Floating view of DOUBLE and FLOAT primitives.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Primitive::Double(v) => Some(v),
            Primitive::Float(v) => Some(v.into()),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Primitive::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Primitive::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i8(&self) -> Option<i8> {
        match *self {
            Primitive::Byte(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match *self {
            Primitive::Short(v) => Some(v),
            Primitive::Byte(v) => Some(v.into()),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match *self {
            Primitive::Char(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Primitive::String(a), Primitive::String(b)) => a == b,
            (Primitive::Int(a), Primitive::Int(b)) => a == b,
            (Primitive::Long(a), Primitive::Long(b)) => a == b,
            (Primitive::Double(a), Primitive::Double(b)) => a.to_bits() == b.to_bits(),
            (Primitive::Float(a), Primitive::Float(b)) => a.to_bits() == b.to_bits(),
            (Primitive::Bool(a), Primitive::Bool(b)) => a == b,
            (Primitive::Byte(a), Primitive::Byte(b)) => a == b,
            (Primitive::Short(a), Primitive::Short(b)) => a == b,
            (Primitive::Char(a), Primitive::Char(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Primitive {}

impl Hash for Primitive {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.primitive_type().hash(state);
        match self {
            Primitive::String(v) => v.hash(state),
            Primitive::Int(v) => v.hash(state),
            Primitive::Long(v) => v.hash(state),
            Primitive::Double(v) => v.to_bits().hash(state),
            Primitive::Float(v) => v.to_bits().hash(state),
            Primitive::Bool(v) => v.hash(state),
            Primitive::Byte(v) => v.hash(state),
            Primitive::Short(v) => v.hash(state),
            Primitive::Char(v) => v.hash(state),
        }
    }
}

/// The string form used wherever a key has to become text (JSON field
/// names, XML tags, schema field names).
impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::String(v) => f.write_str(v),
            Primitive::Int(v) => write!(f, "{v}"),
            Primitive::Long(v) => write!(f, "{v}"),
            Primitive::Double(v) => write!(f, "{v}"),
            Primitive::Float(v) => write!(f, "{v}"),
            Primitive::Bool(v) => write!(f, "{v}"),
            Primitive::Byte(v) => write!(f, "{v}"),
            Primitive::Short(v) => write!(f, "{v}"),
            Primitive::Char(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! primitive_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Primitive {
                fn from(value: $ty) -> Self {
                    Primitive::$variant(value)
                }
            }
        )*
    };
}

primitive_from! {
    String => String,
    i32 => Int,
    i64 => Long,
    f64 => Double,
    f32 => Float,
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    char => Char,
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::String(value.to_owned())
    }
}

impl From<&String> for Primitive {
    fn from(value: &String) -> Self {
        Primitive::String(value.clone())
    }
}

impl From<&Primitive> for Primitive {
    fn from(value: &Primitive) -> Self {
        value.clone()
    }
}

// ── factories ────────────────────────────────────────────────────────────

pub fn string_primitive(value: impl Into<String>) -> Primitive {
    Primitive::String(value.into())
}

pub fn int_primitive(value: i32) -> Primitive {
    Primitive::Int(value)
}

pub fn long_primitive(value: i64) -> Primitive {
    Primitive::Long(value)
}

pub fn double_primitive(value: f64) -> Primitive {
    Primitive::Double(value)
}

pub fn float_primitive(value: f32) -> Primitive {
    Primitive::Float(value)
}

pub fn bool_primitive(value: bool) -> Primitive {
    Primitive::Bool(value)
}

pub fn byte_primitive(value: i8) -> Primitive {
    Primitive::Byte(value)
}

pub fn short_primitive(value: i16) -> Primitive {
    Primitive::Short(value)
}

pub fn char_primitive(value: char) -> Primitive {
    Primitive::Char(value)
}
