//! Tuple-store records.
//!
//! A record is the MessagePack encoding of `[schema, data]`, the two
//! positional tuples produced by [`valtree::tuple`]. Reading a record back
//! restores the full value tree.

use valtree::tuple::{from_tuple, from_tuples, to_data_tuple, to_tuple, SchemaMappingError, Tuple};
use valtree::Value;

use crate::error::MappingError;
use crate::msgpack::{MessagePackReader, MsgPackEncoder};

/// Encodes the shape and payload of `value` as one record.
///
/// MAP and STRING_PARAMETERS_MAP roots have no tuple form.
pub fn write_record(value: &Value) -> Result<Vec<u8>, MappingError> {
    let unsupported = || SchemaMappingError::UnsupportedType(value.value_type());
    let schema = to_tuple(value).ok_or_else(unsupported)?;
    let data = to_data_tuple(value).ok_or_else(unsupported)?;
    tracing::trace!(value_type = %value.value_type(), "writing tuple record");
    Ok(MsgPackEncoder::new().encode_tuple(&Tuple::List(vec![schema, data])))
}

pub fn read_record(bytes: &[u8]) -> Result<Value, MappingError> {
    let record = MessagePackReader::new().read_tuple(bytes)?;
    let [schema, data] = record
        .as_list()
        .ok_or(SchemaMappingError::Malformed("record is not a list"))?
    else {
        return Err(SchemaMappingError::Malformed("record must hold a schema and a data tuple").into());
    };
    let schema = from_tuple(schema)?;
    Ok(from_tuples(&schema, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use valtree::{entity_builder, int_array, MapValue, Primitive, ValueType};

    #[test]
    fn records_restore_declared_kinds() {
        let entity = entity_builder()
            .put("id", 7i32)
            .put("name", "a")
            .put("scores", int_array(vec![1, 2]))
            .put("nested", entity_builder().put("flag", true).build())
            .build();
        let value = Value::from(entity);
        let restored = read_record(&write_record(&value).unwrap()).unwrap();
        assert_eq!(restored, value);
    }

    #[test]
    fn maps_have_no_record_form() {
        let map: MapValue = [(Primitive::from("k"), Value::from("v"))].into_iter().collect();
        assert!(matches!(
            write_record(&Value::Map(map)),
            Err(MappingError::Schema(SchemaMappingError::UnsupportedType(ValueType::Map)))
        ));
    }

    #[test]
    fn corrupt_records_are_rejected() {
        let bytes = MsgPackEncoder::new().encode_tuple(&Tuple::List(vec![Tuple::List(vec![Tuple::Int(99)])]));
        assert!(matches!(
            read_record(&bytes),
            Err(MappingError::Schema(SchemaMappingError::Malformed(_)))
        ));
        let bytes = MsgPackEncoder::new().encode_tuple(&Tuple::List(vec![
            Tuple::List(vec![Tuple::Int(99)]),
            Tuple::Nil,
        ]));
        assert!(matches!(
            read_record(&bytes),
            Err(MappingError::Schema(SchemaMappingError::UnknownOrdinal(99)))
        ));
    }
}
