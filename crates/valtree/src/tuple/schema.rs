use crate::array::ArrayValue;
use crate::entity::Entity;
use crate::types::ValueType;
use crate::value::Value;

use super::error::SchemaMappingError;
use super::Tuple;

/// The value-agnostic shape of a tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSchema {
    /// Primitive kinds and BINARY.
    Leaf(ValueType),
    Entity(EntitySchema),
    Array(ArraySchema),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntitySchema {
    pub fields: Vec<EntityFieldSchema>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityFieldSchema {
    pub value_type: ValueType,
    pub name: String,
    pub schema: ValueSchema,
}

/// One schema per element, positionally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArraySchema {
    pub elements: Vec<ValueSchema>,
}

impl ValueSchema {
    /// Shape of `value`. MAP and STRING_PARAMETERS_MAP nodes have no tuple
    /// form and yield `None`.
    pub fn from_value(value: &Value) -> Option<ValueSchema> {
        match value {
            Value::Primitive(primitive) => Some(ValueSchema::Leaf(primitive.value_type())),
            Value::Binary(_) => Some(ValueSchema::Leaf(ValueType::Binary)),
            Value::Entity(entity) => Some(ValueSchema::Entity(EntitySchema::from_entity(entity))),
            Value::Array(array) => Some(ValueSchema::Array(ArraySchema::from_array(array))),
            Value::Map(_) | Value::StringParametersMap(_) => None,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            ValueSchema::Leaf(value_type) => *value_type,
            ValueSchema::Entity(_) => ValueType::Entity,
            ValueSchema::Array(_) => ValueType::Array,
        }
    }

    pub fn to_tuple(&self) -> Tuple {
        let ordinal = Tuple::Int(self.value_type().ordinal().into());
        match self {
            ValueSchema::Leaf(_) => Tuple::List(vec![ordinal]),
            ValueSchema::Entity(schema) => {
                let fields = schema.fields.iter().map(EntityFieldSchema::to_tuple).collect();
                Tuple::List(vec![ordinal, Tuple::List(fields)])
            }
            ValueSchema::Array(schema) => {
                let elements = schema.elements.iter().map(ValueSchema::to_tuple).collect();
                Tuple::List(vec![ordinal, Tuple::List(elements)])
            }
        }
    }

    pub fn from_tuple(tuple: &Tuple) -> Result<ValueSchema, SchemaMappingError> {
        let items = tuple
            .as_list()
            .ok_or(SchemaMappingError::Malformed("schema node is not a list"))?;
        let value_type = read_type(items.first())?;
        if value_type.is_primitive() || value_type == ValueType::Binary {
            return Ok(ValueSchema::Leaf(value_type));
        }
        let nested = || {
            items
                .get(1)
                .and_then(Tuple::as_list)
                .ok_or(SchemaMappingError::Malformed("missing nested schema list"))
        };
        match value_type {
            ValueType::Entity => {
                let fields = nested()?
                    .iter()
                    .map(EntityFieldSchema::from_tuple)
                    .collect::<Result<_, _>>()?;
                Ok(ValueSchema::Entity(EntitySchema { fields }))
            }
            ValueType::Array => {
                let elements = nested()?
                    .iter()
                    .map(ValueSchema::from_tuple)
                    .collect::<Result<_, _>>()?;
                Ok(ValueSchema::Array(ArraySchema { elements }))
            }
            other => Err(SchemaMappingError::UnsupportedType(other)),
        }
    }
}

impl EntitySchema {
    pub fn from_entity(entity: &Entity) -> EntitySchema {
        let fields = entity
            .iter()
            .filter_map(|(key, value)| {
                let schema = ValueSchema::from_value(&value)?;
                Some(EntityFieldSchema {
                    value_type: value.value_type(),
                    name: key.to_string(),
                    schema,
                })
            })
            .collect();
        EntitySchema { fields }
    }
}

impl EntityFieldSchema {
    pub fn to_tuple(&self) -> Tuple {
        Tuple::List(vec![
            Tuple::Int(self.value_type.ordinal().into()),
            Tuple::Str(self.name.clone()),
            self.schema.to_tuple(),
        ])
    }

    pub fn from_tuple(tuple: &Tuple) -> Result<EntityFieldSchema, SchemaMappingError> {
        let items = tuple
            .as_list()
            .ok_or(SchemaMappingError::Malformed("field schema is not a list"))?;
        let value_type = read_type(items.first())?;
        let name = items
            .get(1)
            .and_then(Tuple::as_str)
            .ok_or(SchemaMappingError::Malformed("field name is not a string"))?;
        let schema = match items.get(2) {
            Some(child) => ValueSchema::from_tuple(child)?,
            None => return Err(SchemaMappingError::Malformed("missing field schema")),
        };
        if schema.value_type() != value_type {
            return Err(SchemaMappingError::Malformed("field type disagrees with its schema"));
        }
        Ok(EntityFieldSchema {
            value_type,
            name: name.to_owned(),
            schema,
        })
    }
}

impl ArraySchema {
    pub fn from_array(array: &ArrayValue) -> ArraySchema {
        let elements = array.iter().filter_map(|item| ValueSchema::from_value(&item)).collect();
        ArraySchema { elements }
    }
}

fn read_type(ordinal: Option<&Tuple>) -> Result<ValueType, SchemaMappingError> {
    let ordinal = ordinal
        .and_then(Tuple::as_int)
        .ok_or(SchemaMappingError::Malformed("type ordinal is not an integer"))?;
    ValueType::from_ordinal(ordinal).ok_or(SchemaMappingError::UnknownOrdinal(ordinal))
}

/// Schema tuple of `value`, or `None` when the value has no tuple form.
pub fn to_tuple(value: &Value) -> Option<Tuple> {
    ValueSchema::from_value(value).map(|schema| schema.to_tuple())
}

pub fn from_tuple(tuple: &Tuple) -> Result<ValueSchema, SchemaMappingError> {
    ValueSchema::from_tuple(tuple)
}
