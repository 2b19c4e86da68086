//! Construction of [`Entity`] and [`ArrayValue`] nodes.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::array::{ArrayStorage, ArrayValue};
use crate::entity::{Entity, LazySlot, Slot};
use crate::mapping::ValueMapper;
use crate::primitive::Primitive;
use crate::types::ElementsType;
use crate::value::{BinaryValue, Value};

// ── EntityBuilder ────────────────────────────────────────────────────────

/// Collects key/value bindings for a single [`Entity`].
///
/// Binding an existing key again replaces its value and keeps the key's
/// original position.
#[derive(Default)]
pub struct EntityBuilder {
    slots: IndexMap<Primitive, Slot>,
}

impl EntityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_slots(slots: IndexMap<Primitive, Slot>) -> Self {
        Self { slots }
    }

    pub fn put(mut self, key: impl Into<Primitive>, value: impl Into<Value>) -> Self {
        self.slots.insert(key.into(), Slot::Ready(value.into()));
        self
    }

    /// Binds `key` to a value computed on first read and memoized afterwards.
    pub fn put_lazy<F>(mut self, key: impl Into<Primitive>, resolve: F) -> Self
    where
        F: Fn() -> Option<Value> + Send + Sync + 'static,
    {
        let slot = LazySlot::new(Box::new(resolve));
        self.slots.insert(key.into(), Slot::Lazy(Arc::new(slot)));
        self
    }

    /// Binds `key` to `model` converted through `mapper`. A model the mapper
    /// maps to nothing leaves the builder unchanged.
    pub fn put_mapped<T>(self, key: impl Into<Primitive>, model: &T, mapper: &ValueMapper<T>) -> Self {
        match mapper.from_model(model) {
            Some(value) => self.put(key, value),
            None => self,
        }
    }

    pub fn remove(mut self, key: impl Into<Primitive>) -> Self {
        self.slots.shift_remove(&key.into());
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn build(self) -> Entity {
        Entity::from_slots(self.slots)
    }
}

pub fn entity_builder() -> EntityBuilder {
    EntityBuilder::new()
}

// ── ArrayValue factories ─────────────────────────────────────────────────

macro_rules! primitive_array {
    ($($name:ident($ty:ty) => $storage:ident, $elements:ident;)*) => {
        $(
            pub fn $name(values: impl Into<Vec<$ty>>) -> ArrayValue {
                ArrayValue::from_storage(
                    ElementsType::$elements,
                    ArrayStorage::$storage(values.into().into()),
                )
            }
        )*
    };
}

primitive_array! {
    int_array(i32) => Ints, Int;
    long_array(i64) => Longs, Long;
    short_array(i16) => Shorts, Short;
    double_array(f64) => Doubles, Double;
    float_array(f32) => Floats, Float;
    bool_array(bool) => Bools, Bool;
    byte_array(i8) => Bytes, Byte;
    char_array(char) => Chars, Char;
}

pub fn string_array<I, S>(values: I) -> ArrayValue
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values = values
        .into_iter()
        .map(|value| Value::Primitive(Primitive::String(value.into())))
        .collect();
    ArrayValue::collection(ElementsType::String, values)
}

pub fn entity_array(values: impl IntoIterator<Item = Entity>) -> ArrayValue {
    let values = values.into_iter().map(Value::Entity).collect();
    ArrayValue::collection(ElementsType::Entity, values)
}

pub fn nested_array(values: impl IntoIterator<Item = ArrayValue>) -> ArrayValue {
    let values = values.into_iter().map(Value::Array).collect();
    ArrayValue::collection(ElementsType::Array, values)
}

pub fn binary_array(values: impl IntoIterator<Item = BinaryValue>) -> ArrayValue {
    let values = values.into_iter().map(Value::Binary).collect();
    ArrayValue::collection(ElementsType::Binary, values)
}

/// A `COLLECTION` array whose element type is the common type of `values`,
/// or `VALUE` when they differ or there are none.
pub fn array(values: impl IntoIterator<Item = Value>) -> ArrayValue {
    let values: Vec<Value> = values.into_iter().collect();
    let mut types = values.iter().map(Value::value_type);
    let elements_type = match types.next() {
        Some(first) if types.all(|other| other == first) => ElementsType::of(first),
        _ => ElementsType::Value,
    };
    ArrayValue::collection(elements_type, values)
}

pub fn empty_array() -> ArrayValue {
    ArrayValue::collection(ElementsType::Value, Vec::new())
}
