//! Tuple-store encoding of value trees.
//!
//! A tree is persisted as two positional tuples: a *schema* tuple recording
//! the shape (type ordinals and field names) and a *data* tuple carrying the
//! scalar payloads in the same order.

mod data;
mod error;
mod schema;

pub use data::{from_tuples, to_data_tuple};
pub use error::SchemaMappingError;
pub use schema::{from_tuple, to_tuple, ArraySchema, EntityFieldSchema, EntitySchema, ValueSchema};

/// A positional storage value.
#[derive(Debug, Clone, PartialEq)]
pub enum Tuple {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bin(Vec<u8>),
    List(Vec<Tuple>),
}

impl Tuple {
    pub fn as_list(&self) -> Option<&[Tuple]> {
        match self {
            Tuple::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Tuple::Int(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tuple::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl From<i64> for Tuple {
    fn from(value: i64) -> Self {
        Tuple::Int(value)
    }
}

impl From<&str> for Tuple {
    fn from(value: &str) -> Self {
        Tuple::Str(value.to_owned())
    }
}

impl From<Vec<Tuple>> for Tuple {
    fn from(value: Vec<Tuple>) -> Self {
        Tuple::List(value)
    }
}
