use crate::builder::{array, entity_builder};
use crate::primitive::Primitive;
use crate::types::ValueType;
use crate::value::{BinaryValue, Value};

use super::error::SchemaMappingError;
use super::schema::ValueSchema;
use super::Tuple;

/// Payload tuple of `value`, positionally aligned with its schema tuple.
pub fn to_data_tuple(value: &Value) -> Option<Tuple> {
    match value {
        Value::Primitive(primitive) => Some(primitive_payload(primitive)),
        Value::Binary(binary) => Some(Tuple::Bin(binary.content().to_vec())),
        Value::Entity(entity) => Some(Tuple::List(
            entity
                .iter()
                .filter_map(|(_, value)| to_data_tuple(&value))
                .collect(),
        )),
        Value::Array(items) => Some(Tuple::List(
            items.iter().filter_map(|item| to_data_tuple(&item)).collect(),
        )),
        Value::Map(_) | Value::StringParametersMap(_) => None,
    }
}

fn primitive_payload(primitive: &Primitive) -> Tuple {
    match primitive {
        Primitive::String(value) => Tuple::Str(value.clone()),
        Primitive::Char(value) => Tuple::Str(value.to_string()),
        Primitive::Int(value) => Tuple::Int((*value).into()),
        Primitive::Long(value) => Tuple::Int(*value),
        Primitive::Short(value) => Tuple::Int((*value).into()),
        Primitive::Byte(value) => Tuple::Int((*value).into()),
        Primitive::Double(value) => Tuple::Float(*value),
        Primitive::Float(value) => Tuple::Float((*value).into()),
        Primitive::Bool(value) => Tuple::Bool(*value),
    }
}

/// Rebuilds a tree from a schema and its aligned payload tuple. Entity keys
/// come back as STRING primitives; leaves regain their declared kind.
pub fn from_tuples(schema: &ValueSchema, data: &Tuple) -> Result<Value, SchemaMappingError> {
    match schema {
        ValueSchema::Leaf(value_type) => leaf(*value_type, data),
        ValueSchema::Entity(entity) => {
            let payloads = aligned(data, entity.fields.len(), ValueType::Entity)?;
            let mut builder = entity_builder();
            for (field, payload) in entity.fields.iter().zip(payloads) {
                builder = builder.put(field.name.as_str(), from_tuples(&field.schema, payload)?);
            }
            Ok(Value::Entity(builder.build()))
        }
        ValueSchema::Array(items) => {
            let payloads = aligned(data, items.elements.len(), ValueType::Array)?;
            let values = items
                .elements
                .iter()
                .zip(payloads)
                .map(|(schema, payload)| from_tuples(schema, payload))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(array(values)))
        }
    }
}

fn aligned(data: &Tuple, len: usize, expected: ValueType) -> Result<&[Tuple], SchemaMappingError> {
    match data.as_list() {
        Some(items) if items.len() == len => Ok(items),
        _ => Err(SchemaMappingError::DataMismatch { expected }),
    }
}

fn leaf(value_type: ValueType, data: &Tuple) -> Result<Value, SchemaMappingError> {
    let mismatch = || SchemaMappingError::DataMismatch {
        expected: value_type,
    };
    let primitive = match (value_type, data) {
        (ValueType::String, Tuple::Str(value)) => Primitive::String(value.clone()),
        (ValueType::Char, Tuple::Str(value)) => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(value), None) => Primitive::Char(value),
                _ => return Err(mismatch()),
            }
        }
        (ValueType::Int, Tuple::Int(value)) => {
            Primitive::Int(i32::try_from(*value).map_err(|_| mismatch())?)
        }
        (ValueType::Long, Tuple::Int(value)) => Primitive::Long(*value),
        (ValueType::Short, Tuple::Int(value)) => {
            Primitive::Short(i16::try_from(*value).map_err(|_| mismatch())?)
        }
        (ValueType::Byte, Tuple::Int(value)) => {
            Primitive::Byte(i8::try_from(*value).map_err(|_| mismatch())?)
        }
        (ValueType::Double, Tuple::Float(value)) => Primitive::Double(*value),
        (ValueType::Float, Tuple::Float(value)) => Primitive::Float(*value as f32),
        (ValueType::Bool, Tuple::Bool(value)) => Primitive::Bool(*value),
        (ValueType::Binary, Tuple::Bin(value)) => {
            return Ok(Value::Binary(BinaryValue::from(value.as_slice())))
        }
        _ => return Err(mismatch()),
    };
    Ok(Value::Primitive(primitive))
}
