//! MessagePack to value trees.
//!
//! Maps become entities keyed by the native primitive kind of each key,
//! integers read as LONG, `float 32` as FLOAT and `float 64` as DOUBLE.
//! `nil` reads as an absent value: such map entries and array elements are
//! dropped. Containers nested deeper than [`MAX_DEPTH`] are rejected.

use valtree::tuple::Tuple;
use valtree::{array, entity_builder, BinaryValue, Primitive, Value};
use valtree_buffers::Reader;

use super::constants::*;
use super::error::MsgPackError;

/// Deepest array/map nesting the reader descends into.
pub const MAX_DEPTH: usize = 512;

/// One decoded MessagePack item.
enum Item {
    Nil,
    Bool(bool),
    Int(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Bin(Vec<u8>),
    Array(usize),
    Map(usize),
}

#[derive(Debug, Clone, Default)]
pub struct MessagePackReader;

impl MessagePackReader {
    pub fn new() -> Self {
        Self
    }

    /// Decodes a single value spanning all of `bytes`. Empty input reads as
    /// `None`.
    pub fn read(&self, bytes: &[u8]) -> Result<Option<Value>, MsgPackError> {
        if bytes.is_empty() {
            return Ok(None);
        }
        let mut reader = Reader::new(bytes);
        let value = read_value(&mut reader, 0)?;
        ensure_consumed(&reader)?;
        Ok(value)
    }

    /// Decodes a storage tuple written by
    /// [`MsgPackEncoder::encode_tuple`](super::MsgPackEncoder::encode_tuple).
    pub fn read_tuple(&self, bytes: &[u8]) -> Result<Tuple, MsgPackError> {
        let mut reader = Reader::new(bytes);
        let tuple = read_tuple(&mut reader, 0)?;
        ensure_consumed(&reader)?;
        Ok(tuple)
    }
}

fn ensure_consumed(reader: &Reader<'_>) -> Result<(), MsgPackError> {
    match reader.size() {
        0 => Ok(()),
        remaining => Err(MsgPackError::TrailingBytes(remaining)),
    }
}

fn read_item(reader: &mut Reader<'_>) -> Result<Item, MsgPackError> {
    let offset = reader.x;
    let marker = reader.u8()?;
    let item = match marker {
        0x00..=0x7f => Item::Int(marker.into()),
        0x80..=0x8f => Item::Map((marker & 0x0f).into()),
        0x90..=0x9f => Item::Array((marker & 0x0f).into()),
        0xa0..=0xbf => Item::Str(read_str(reader, (marker & 0x1f).into())?),
        0xe0..=0xff => Item::Int((marker as i8).into()),
        NIL => Item::Nil,
        FALSE => Item::Bool(false),
        TRUE => Item::Bool(true),
        BIN8 => {
            let length = reader.u8()?.into();
            Item::Bin(reader.buf(length)?.to_vec())
        }
        BIN16 => {
            let length = reader.u16()?.into();
            Item::Bin(reader.buf(length)?.to_vec())
        }
        BIN32 => {
            let length = reader.u32()? as usize;
            Item::Bin(reader.buf(length)?.to_vec())
        }
        FLOAT32 => Item::F32(reader.f32()?),
        FLOAT64 => Item::F64(reader.f64()?),
        UINT8 => Item::Int(reader.u8()?.into()),
        UINT16 => Item::Int(reader.u16()?.into()),
        UINT32 => Item::Int(reader.u32()?.into()),
        UINT64 => {
            let value = reader.u64()?;
            Item::Int(i64::try_from(value).map_err(|_| MsgPackError::IntegerOverflow(offset))?)
        }
        INT8 => Item::Int(reader.i8()?.into()),
        INT16 => Item::Int(reader.i16()?.into()),
        INT32 => Item::Int(reader.i32()?.into()),
        INT64 => Item::Int(reader.i64()?),
        STR8 => {
            let length = reader.u8()?.into();
            Item::Str(read_str(reader, length)?)
        }
        STR16 => {
            let length = reader.u16()?.into();
            Item::Str(read_str(reader, length)?)
        }
        STR32 => {
            let length = reader.u32()? as usize;
            Item::Str(read_str(reader, length)?)
        }
        ARRAY16 => Item::Array(reader.u16()?.into()),
        ARRAY32 => Item::Array(reader.u32()? as usize),
        MAP16 => Item::Map(reader.u16()?.into()),
        MAP32 => Item::Map(reader.u32()? as usize),
        EXT8..=EXT32 | FIXEXT1..=FIXEXT16 => return Err(MsgPackError::UnsupportedExtension(offset)),
        _ => return Err(MsgPackError::InvalidByte(offset)),
    };
    Ok(item)
}

fn read_str(reader: &mut Reader<'_>, length: usize) -> Result<String, MsgPackError> {
    Ok(reader.utf8(length)?.to_owned())
}

fn descend(item: &Item, offset: usize, depth: usize) -> Result<usize, MsgPackError> {
    match item {
        Item::Array(_) | Item::Map(_) if depth >= MAX_DEPTH => Err(MsgPackError::DepthLimit(offset)),
        _ => Ok(depth + 1),
    }
}

fn read_value(reader: &mut Reader<'_>, depth: usize) -> Result<Option<Value>, MsgPackError> {
    let offset = reader.x;
    let item = read_item(reader)?;
    let depth = descend(&item, offset, depth)?;
    let value = match item {
        Item::Nil => return Ok(None),
        Item::Bool(value) => Value::from(value),
        Item::Int(value) => Value::from(value),
        Item::F32(value) => Value::from(value),
        Item::F64(value) => Value::from(value),
        Item::Str(value) => Value::from(value),
        Item::Bin(value) => Value::Binary(BinaryValue::from(value)),
        Item::Array(length) => {
            let mut values = Vec::with_capacity(length.min(reader.size()));
            for _ in 0..length {
                if let Some(value) = read_value(reader, depth)? {
                    values.push(value);
                }
            }
            Value::Array(array(values))
        }
        Item::Map(length) => {
            let mut builder = entity_builder();
            for _ in 0..length {
                let key = read_key(reader)?;
                if let Some(value) = read_value(reader, depth)? {
                    builder = builder.put(key, value);
                }
            }
            Value::Entity(builder.build())
        }
    };
    Ok(Some(value))
}

fn read_key(reader: &mut Reader<'_>) -> Result<Primitive, MsgPackError> {
    let offset = reader.x;
    let key = match read_item(reader)? {
        Item::Bool(value) => Primitive::Bool(value),
        Item::Int(value) => Primitive::Long(value),
        Item::F32(value) => Primitive::Float(value),
        Item::F64(value) => Primitive::Double(value),
        Item::Str(value) => Primitive::String(value),
        _ => return Err(MsgPackError::InvalidKey(offset)),
    };
    Ok(key)
}

fn read_tuple(reader: &mut Reader<'_>, depth: usize) -> Result<Tuple, MsgPackError> {
    let offset = reader.x;
    let item = read_item(reader)?;
    let depth = descend(&item, offset, depth)?;
    let tuple = match item {
        Item::Nil => Tuple::Nil,
        Item::Bool(value) => Tuple::Bool(value),
        Item::Int(value) => Tuple::Int(value),
        Item::F32(value) => Tuple::Float(value.into()),
        Item::F64(value) => Tuple::Float(value),
        Item::Str(value) => Tuple::Str(value),
        Item::Bin(value) => Tuple::Bin(value),
        Item::Array(length) => {
            let mut items = Vec::with_capacity(length.min(reader.size()));
            for _ in 0..length {
                items.push(read_tuple(reader, depth)?);
            }
            Tuple::List(items)
        }
        Item::Map(_) => return Err(MsgPackError::InvalidByte(reader.x)),
    };
    Ok(tuple)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgpack::{MessagePackWriter, MsgPackEncoder};
    use valtree::{byte_primitive, long_array, Entity};

    fn round_trip(value: &Value) -> Option<Value> {
        let bytes = MessagePackWriter::new().write(value);
        MessagePackReader::new().read(&bytes).unwrap()
    }

    #[test]
    fn entities_keep_native_keys() {
        let entity = entity_builder().put(7i64, "seven").put("s", 1.5f64).build();
        let restored = round_trip(&Value::from(entity)).unwrap();
        let restored = restored.as_entity().unwrap();
        assert_eq!(restored.get(7i64), Some(Value::from("seven")));
        assert_eq!(restored.get("s"), Some(Value::from(1.5f64)));
        assert!(!restored.has("7"));
    }

    #[test]
    fn scalars_widen_to_long() {
        assert_eq!(round_trip(&Value::from(3i32)), Some(Value::from(3i64)));
        assert_eq!(round_trip(&Value::from(0.25f32)), Some(Value::from(0.25f32)));
    }

    #[test]
    fn arrays_round_trip() {
        let value = Value::from(long_array(vec![1, -70_000, i64::MAX]));
        assert_eq!(round_trip(&value), Some(value));
    }

    #[test]
    fn empty_input_is_none() {
        assert_eq!(MessagePackReader::new().read(&[]), Ok(None));
        assert_eq!(MessagePackReader::new().read(&[0xc0]), Ok(None));
        let empty_map = MessagePackReader::new().read(&[0x80]).unwrap();
        assert_eq!(empty_map, Some(Value::from(Entity::empty())));
    }

    #[test]
    fn malformed_input() {
        let reader = MessagePackReader::new();
        assert_eq!(reader.read(&[0xc1]), Err(MsgPackError::InvalidByte(0)));
        assert_eq!(reader.read(&[0xa3, b'a']), Err(MsgPackError::UnexpectedEof));
        assert_eq!(reader.read(&[0x01, 0x02]), Err(MsgPackError::TrailingBytes(1)));
        assert_eq!(reader.read(&[0xd4, 0x00, 0x00]), Err(MsgPackError::UnsupportedExtension(0)));
        assert_eq!(reader.read(&[0x81, 0x90, 0x01]), Err(MsgPackError::InvalidKey(1)));
        assert_eq!(
            reader.read(&[0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]),
            Err(MsgPackError::IntegerOverflow(0))
        );
    }

    #[test]
    fn nesting_is_bounded() {
        let reader = MessagePackReader::new();
        let mut bytes = vec![0x91; 100_000];
        bytes.push(0x01);
        assert_eq!(reader.read(&bytes), Err(MsgPackError::DepthLimit(MAX_DEPTH)));
        assert_eq!(reader.read_tuple(&bytes), Err(MsgPackError::DepthLimit(MAX_DEPTH)));

        let mut maps = [0x81, 0x01].repeat(100_000);
        maps.push(0x01);
        assert_eq!(reader.read(&maps), Err(MsgPackError::DepthLimit(2 * MAX_DEPTH)));

        let mut bytes = vec![0x91; MAX_DEPTH];
        bytes.push(0x01);
        let mut value = reader.read(&bytes).unwrap().unwrap();
        for _ in 0..MAX_DEPTH {
            value = value.as_array().unwrap().get(0).unwrap();
        }
        assert_eq!(value, Value::from(1i64));
    }

    #[test]
    fn byte_keys_read_back_as_integers() {
        let entity = entity_builder().put(byte_primitive(5), "v").build();
        let restored = round_trip(&Value::from(entity)).unwrap();
        assert_eq!(restored.as_entity().unwrap().get(5i64), Some(Value::from("v")));
        assert_eq!(
            MessagePackReader::new().read(&[0x81, 0xc4, 0x01, 0x05, 0xa1, b'v']),
            Err(MsgPackError::InvalidKey(1))
        );
    }

    #[test]
    fn tuples_round_trip() {
        let tuple = Tuple::List(vec![
            Tuple::Int(0),
            Tuple::List(vec![Tuple::Str("a".into()), Tuple::Float(0.5), Tuple::Bin(vec![1])]),
            Tuple::Bool(true),
            Tuple::Nil,
        ]);
        let bytes = MsgPackEncoder::new().encode_tuple(&tuple);
        assert_eq!(MessagePackReader::new().read_tuple(&bytes), Ok(tuple));
    }
}
