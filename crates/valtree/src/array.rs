//! Ordered sequence nodes.
//!
//! A [`ArrayValue`] either stores raw scalars of one primitive kind
//! (`PRIMITIVE_ARRAY`, no boxing) or a sequence of boxed [`Value`]s
//! (`COLLECTION`). Codecs read the storage through the typed slice accessors
//! to pick a dense write path.

use std::sync::Arc;

use crate::primitive::Primitive;
use crate::types::{CollectionMode, ElementsType};
use crate::value::Value;

#[derive(Debug, Clone)]
pub(crate) enum ArrayStorage {
    Ints(Arc<[i32]>),
    Longs(Arc<[i64]>),
    Shorts(Arc<[i16]>),
    Doubles(Arc<[f64]>),
    Floats(Arc<[f32]>),
    Bools(Arc<[bool]>),
    Bytes(Arc<[i8]>),
    Chars(Arc<[char]>),
    Values(Arc<[Value]>),
}

#[derive(Debug, Clone)]
pub struct ArrayValue {
    elements_type: ElementsType,
    storage: ArrayStorage,
}

impl ArrayValue {
    pub(crate) fn from_storage(elements_type: ElementsType, storage: ArrayStorage) -> Self {
        Self {
            elements_type,
            storage,
        }
    }

    /// A `COLLECTION` array with an explicitly declared element type.
    pub fn collection(elements_type: ElementsType, values: Vec<Value>) -> Self {
        Self::from_storage(elements_type, ArrayStorage::Values(values.into()))
    }

    pub fn collection_mode(&self) -> CollectionMode {
        match self.storage {
            ArrayStorage::Values(_) => CollectionMode::Collection,
            _ => CollectionMode::PrimitiveArray,
        }
    }

    pub fn elements_type(&self) -> ElementsType {
        self.elements_type
    }

    pub fn len(&self) -> usize {
        match &self.storage {
            ArrayStorage::Ints(v) => v.len(),
            ArrayStorage::Longs(v) => v.len(),
            ArrayStorage::Shorts(v) => v.len(),
            ArrayStorage::Doubles(v) => v.len(),
            ArrayStorage::Floats(v) => v.len(),
            ArrayStorage::Bools(v) => v.len(),
            ArrayStorage::Bytes(v) => v.len(),
            ArrayStorage::Chars(v) => v.len(),
            ArrayStorage::Values(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, boxing raw scalars.
    pub fn get(&self, index: usize) -> Option<Value> {
        let primitive = match &self.storage {
            ArrayStorage::Ints(v) => Primitive::Int(*v.get(index)?),
            ArrayStorage::Longs(v) => Primitive::Long(*v.get(index)?),
            ArrayStorage::Shorts(v) => Primitive::Short(*v.get(index)?),
            ArrayStorage::Doubles(v) => Primitive::Double(*v.get(index)?),
            ArrayStorage::Floats(v) => Primitive::Float(*v.get(index)?),
            ArrayStorage::Bools(v) => Primitive::Bool(*v.get(index)?),
            ArrayStorage::Bytes(v) => Primitive::Byte(*v.get(index)?),
            ArrayStorage::Chars(v) => Primitive::Char(*v.get(index)?),
            ArrayStorage::Values(v) => return v.get(index).cloned(),
        };
        Some(Value::Primitive(primitive))
    }

    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }

    pub fn to_values(&self) -> Vec<Value> {
        self.iter().collect()
    }

    pub fn ints(&self) -> Option<&[i32]> {
        match &self.storage {
            ArrayStorage::Ints(v) => Some(v),
            _ => None,
        }
    }

    pub fn longs(&self) -> Option<&[i64]> {
        match &self.storage {
            ArrayStorage::Longs(v) => Some(v),
            _ => None,
        }
    }

    pub fn shorts(&self) -> Option<&[i16]> {
        match &self.storage {
            ArrayStorage::Shorts(v) => Some(v),
            _ => None,
        }
    }

    pub fn doubles(&self) -> Option<&[f64]> {
        match &self.storage {
            ArrayStorage::Doubles(v) => Some(v),
            _ => None,
        }
    }

    pub fn floats(&self) -> Option<&[f32]> {
        match &self.storage {
            ArrayStorage::Floats(v) => Some(v),
            _ => None,
        }
    }

    pub fn bools(&self) -> Option<&[bool]> {
        match &self.storage {
            ArrayStorage::Bools(v) => Some(v),
            _ => None,
        }
    }

    pub fn bytes(&self) -> Option<&[i8]> {
        match &self.storage {
            ArrayStorage::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn chars(&self) -> Option<&[char]> {
        match &self.storage {
            ArrayStorage::Chars(v) => Some(v),
            _ => None,
        }
    }

    /// Boxed elements of a `COLLECTION` array.
    pub fn values(&self) -> Option<&[Value]> {
        match &self.storage {
            ArrayStorage::Values(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{array, int_array, long_array, string_array};

    #[test]
    fn primitive_arrays_expose_typed_slices() {
        let ints = int_array(vec![1, 2, 3]);
        assert_eq!(ints.collection_mode(), CollectionMode::PrimitiveArray);
        assert_eq!(ints.elements_type(), ElementsType::Int);
        assert_eq!(ints.ints(), Some(&[1, 2, 3][..]));
        assert_eq!(ints.longs(), None);
        assert_eq!(ints.get(1), Some(Value::from(2i32)));
        assert_eq!(ints.get(3), None);
    }

    #[test]
    fn collections_box_their_elements() {
        let strings = string_array(["x", "y"]);
        assert_eq!(strings.collection_mode(), CollectionMode::Collection);
        assert_eq!(strings.elements_type(), ElementsType::String);
        assert_eq!(strings.to_values(), vec![Value::from("x"), Value::from("y")]);
    }

    #[test]
    fn equality_is_element_wise() {
        let dense = long_array(vec![1, 2]);
        let boxed = array(vec![Value::from(1i64), Value::from(2i64)]);
        assert_eq!(dense, boxed);
        assert_ne!(dense, long_array(vec![1, 2, 3]));
        assert_ne!(dense, int_array(vec![1, 2]));
    }
}
