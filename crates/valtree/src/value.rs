//! The [`Value`] tagged union and its eager leaf/map nodes.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::array::ArrayValue;
use crate::entity::Entity;
use crate::primitive::Primitive;
use crate::types::ValueType;

/// A node of the value tree.
///
/// Every variant is immutable and cheap to clone: structural nodes share
/// their storage through `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Primitive(Primitive),
    Entity(Entity),
    Array(ArrayValue),
    Binary(BinaryValue),
    Map(MapValue),
    StringParametersMap(StringParametersMap),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Primitive(p) => p.value_type(),
            Value::Entity(_) => ValueType::Entity,
            Value::Array(_) => ValueType::Array,
            Value::Binary(_) => ValueType::Binary,
            Value::Map(_) => ValueType::Map,
            Value::StringParametersMap(_) => ValueType::StringParametersMap,
        }
    }

    /// Uniform emptiness rule consulted by every codec's sparse policy.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Primitive(p) => p.is_empty(),
            Value::Entity(e) => e.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Binary(b) => b.is_empty(),
            Value::Map(m) => m.is_empty(),
            Value::StringParametersMap(m) => m.is_empty(),
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Value::Primitive(_))
    }

    /// Collection-typed nodes serialize as arrays when empty.
    pub fn is_collection(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Value::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Value::Entity(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&BinaryValue> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_string_parameters(&self) -> Option<&StringParametersMap> {
        match self {
            Value::StringParametersMap(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_primitive().and_then(Primitive::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_primitive().and_then(Primitive::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_primitive().and_then(Primitive::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_primitive().and_then(Primitive::as_bool)
    }
}

impl From<Primitive> for Value {
    fn from(value: Primitive) -> Self {
        Value::Primitive(value)
    }
}

impl From<Entity> for Value {
    fn from(value: Entity) -> Self {
        Value::Entity(value)
    }
}

impl From<ArrayValue> for Value {
    fn from(value: ArrayValue) -> Self {
        Value::Array(value)
    }
}

impl From<BinaryValue> for Value {
    fn from(value: BinaryValue) -> Self {
        Value::Binary(value)
    }
}

impl From<MapValue> for Value {
    fn from(value: MapValue) -> Self {
        Value::Map(value)
    }
}

impl From<StringParametersMap> for Value {
    fn from(value: StringParametersMap) -> Self {
        Value::StringParametersMap(value)
    }
}

macro_rules! value_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Primitive(Primitive::from(value))
                }
            }
        )*
    };
}

value_from_scalar!(&str, String, i32, i64, f64, f32, bool, i8, i16, char);

// ── BinaryValue ──────────────────────────────────────────────────────────

/// An opaque byte blob. Empty iff it holds zero bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryValue {
    content: Arc<[u8]>,
}

impl BinaryValue {
    pub fn new(content: impl Into<Arc<[u8]>>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl From<Vec<u8>> for BinaryValue {
    fn from(value: Vec<u8>) -> Self {
        BinaryValue::new(value)
    }
}

impl From<&[u8]> for BinaryValue {
    fn from(value: &[u8]) -> Self {
        BinaryValue::new(value)
    }
}

// ── MapValue ─────────────────────────────────────────────────────────────

/// An eagerly held map from primitive keys to values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapValue {
    elements: Arc<IndexMap<Primitive, Value>>,
}

impl MapValue {
    pub fn new(elements: IndexMap<Primitive, Value>) -> Self {
        Self {
            elements: Arc::new(elements),
        }
    }

    pub fn get(&self, key: &Primitive) -> Option<&Value> {
        self.elements.get(key)
    }

    pub fn has(&self, key: &Primitive) -> bool {
        self.elements.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Primitive, Value> {
        self.elements.iter()
    }

    pub fn elements(&self) -> &IndexMap<Primitive, Value> {
        &self.elements
    }
}

impl FromIterator<(Primitive, Value)> for MapValue {
    fn from_iter<I: IntoIterator<Item = (Primitive, Value)>>(iter: I) -> Self {
        MapValue::new(iter.into_iter().collect())
    }
}

// ── StringParametersMap ──────────────────────────────────────────────────

/// An eagerly held `String -> String` map, typically request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringParametersMap {
    parameters: Arc<IndexMap<String, String>>,
}

impl StringParametersMap {
    pub fn new(parameters: IndexMap<String, String>) -> Self {
        Self {
            parameters: Arc::new(parameters),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn has(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.parameters.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StringParametersMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        StringParametersMap::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_types() {
        assert_eq!(Value::from("x").value_type(), ValueType::String);
        assert_eq!(Value::from(1i32).value_type(), ValueType::Int);
        assert_eq!(
            Value::from(BinaryValue::from(vec![1u8])).value_type(),
            ValueType::Binary
        );
        assert_eq!(Value::from(Entity::empty()).value_type(), ValueType::Entity);
    }

    #[test]
    fn emptiness() {
        assert!(Value::from("").is_empty());
        assert!(!Value::from(0i64).is_empty());
        assert!(Value::from(BinaryValue::from(Vec::new())).is_empty());
        assert!(Value::from(MapValue::default()).is_empty());
        assert!(Value::from(StringParametersMap::default()).is_empty());
    }

    #[test]
    fn map_values_keep_insertion_order() {
        let map: MapValue = vec![
            (Primitive::from(2i32), Value::from("b")),
            (Primitive::from(1i32), Value::from("a")),
        ]
        .into_iter()
        .collect();
        let keys: Vec<_> = map.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec![Primitive::Int(2), Primitive::Int(1)]);
        assert_eq!(map.get(&Primitive::Int(1)), Some(&Value::from("a")));
    }

    #[test]
    fn string_parameters_lookup() {
        let params: StringParametersMap = vec![("q", "rust"), ("page", "2")].into_iter().collect();
        assert_eq!(params.get("page"), Some("2"));
        assert!(!params.has("missing"));
    }
}
