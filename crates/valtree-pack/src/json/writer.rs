//! JSON output for value trees.
//!
//! The tree is exposed to `serde` through thin borrowing adapters and streamed
//! by `serde_json`'s serializer. Entity fields holding empty values are left
//! out of the enclosing object.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use valtree::{ArrayValue, Entity, MapValue, Primitive, StringParametersMap, Value};

use crate::config::{Charset, CodecConfig};
use crate::error::MappingError;
use crate::stream::ScopedStream;

const EMPTY_OBJECT: &[u8] = b"{}";
const EMPTY_ARRAY: &[u8] = b"[]";

#[derive(Debug, Clone, Default)]
pub struct JsonWriter {
    pub pretty: bool,
    pub charset: Charset,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    pub fn with_config(config: &CodecConfig) -> Self {
        Self {
            pretty: config.pretty,
            charset: config.charset,
        }
    }

    /// Renders `value` as JSON text.
    ///
    /// `None` renders as `{}`. An empty value renders as `[]` when it is an
    /// array and `{}` otherwise. A primitive renders as its bare literal.
    pub fn write<'a>(&self, value: impl Into<Option<&'a Value>>) -> Result<String, MappingError> {
        let mut out = Vec::new();
        self.write_to(value, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    /// Like [`JsonWriter::write`], encoded with the configured charset.
    pub fn write_bytes<'a>(&self, value: impl Into<Option<&'a Value>>) -> Result<Vec<u8>, MappingError> {
        Ok(self.charset.encode(self.write(value)?))
    }

    /// Streams UTF-8 JSON into `out`. The sink is flushed on every exit path.
    pub fn write_to<'a, W: Write>(
        &self,
        value: impl Into<Option<&'a Value>>,
        out: W,
    ) -> Result<(), MappingError> {
        let mut stream = ScopedStream::new("json", out);
        let value = match value.into() {
            None => return Ok(stream.write_all(EMPTY_OBJECT)?),
            Some(value) if value.is_empty() => {
                let empty = if value.is_collection() { EMPTY_ARRAY } else { EMPTY_OBJECT };
                return Ok(stream.write_all(empty)?);
            }
            Some(value) => value,
        };
        tracing::trace!(value_type = %value.value_type(), pretty = self.pretty, "writing json");
        if self.pretty {
            let mut serializer = serde_json::Serializer::with_formatter(&mut stream, PrettyFormatter::new());
            JsonValue(value).serialize(&mut serializer)?;
        } else {
            serde_json::to_writer(&mut stream, &JsonValue(value))?;
        }
        Ok(())
    }
}

// ── serde adapters ───────────────────────────────────────────────────────

struct JsonValue<'a>(&'a Value);

struct JsonPrimitive<'a>(&'a Primitive);

struct JsonEntity<'a>(&'a Entity);

struct JsonArray<'a>(&'a ArrayValue);

struct JsonMap<'a>(&'a MapValue);

struct JsonParameters<'a>(&'a StringParametersMap);

impl Serialize for JsonValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Primitive(primitive) => JsonPrimitive(primitive).serialize(serializer),
            Value::Entity(entity) => JsonEntity(entity).serialize(serializer),
            Value::Array(array) => JsonArray(array).serialize(serializer),
            Value::Binary(binary) => serializer.serialize_str(&STANDARD.encode(binary.content())),
            Value::Map(map) => JsonMap(map).serialize(serializer),
            Value::StringParametersMap(parameters) => JsonParameters(parameters).serialize(serializer),
        }
    }
}

impl Serialize for JsonPrimitive<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self.0 {
            Primitive::String(ref value) => serializer.serialize_str(value),
            Primitive::Int(value) => serializer.serialize_i32(value),
            Primitive::Long(value) => serializer.serialize_i64(value),
            Primitive::Double(value) => serializer.serialize_f64(value),
            Primitive::Float(value) => serializer.serialize_f32(value),
            Primitive::Bool(value) => serializer.serialize_bool(value),
            Primitive::Byte(value) => serializer.serialize_i8(value),
            Primitive::Short(value) => serializer.serialize_i16(value),
            Primitive::Char(value) => serializer.serialize_char(value),
        }
    }
}

impl Serialize for JsonEntity<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.0.iter() {
            if value.is_empty() {
                continue;
            }
            map.serialize_entry(&key.to_string(), &JsonValue(&value))?;
        }
        map.end()
    }
}

impl Serialize for JsonArray<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let array = self.0;
        if let Some(values) = array.ints() {
            return serializer.collect_seq(values);
        }
        if let Some(values) = array.longs() {
            return serializer.collect_seq(values);
        }
        if let Some(values) = array.shorts() {
            return serializer.collect_seq(values);
        }
        if let Some(values) = array.doubles() {
            return serializer.collect_seq(values);
        }
        if let Some(values) = array.floats() {
            return serializer.collect_seq(values);
        }
        if let Some(values) = array.bools() {
            return serializer.collect_seq(values);
        }
        if let Some(values) = array.bytes() {
            return serializer.collect_seq(values);
        }
        if let Some(values) = array.chars() {
            return serializer.collect_seq(values);
        }
        let values = array.values().unwrap_or_default();
        serializer.collect_seq(values.iter().map(JsonValue))
    }
}

impl Serialize for JsonMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.0.iter() {
            if value.is_empty() {
                continue;
            }
            map.serialize_entry(&key.to_string(), &JsonValue(value))?;
        }
        map.end()
    }
}

impl Serialize for JsonParameters<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valtree::{char_array, entity_builder, float_array, int_array, string_array, BinaryValue};

    fn write(value: Value) -> String {
        JsonWriter::new().write(&value).unwrap()
    }

    #[test]
    fn concrete_entity() {
        let entity = entity_builder()
            .put("name", "a")
            .put("count", 3i64)
            .put("tags", string_array(["x", "y"]))
            .build();
        assert_eq!(write(entity.into()), r#"{"name":"a","count":3,"tags":["x","y"]}"#);
    }

    #[test]
    fn empty_inputs() {
        let writer = JsonWriter::new();
        assert_eq!(writer.write(None::<&Value>).unwrap(), "{}");
        assert_eq!(write(Entity::empty().into()), "{}");
        assert_eq!(write(valtree::empty_array().into()), "[]");
        assert_eq!(write(Value::from("")), "{}");
    }

    #[test]
    fn empty_fields_are_omitted() {
        let entity = entity_builder()
            .put("a", "")
            .put("b", Entity::empty())
            .put("c", 0i32)
            .put("d", false)
            .build();
        assert_eq!(write(entity.into()), r#"{"c":0,"d":false}"#);
    }

    #[test]
    fn scalars_are_bare_literals() {
        assert_eq!(write(Value::from("hi")), r#""hi""#);
        assert_eq!(write(Value::from(7i64)), "7");
        assert_eq!(write(Value::from(true)), "true");
        assert_eq!(write(Value::from('c')), r#""c""#);
    }

    #[test]
    fn primitive_arrays() {
        assert_eq!(write(int_array(vec![1, -2, 3]).into()), "[1,-2,3]");
        assert_eq!(write(float_array(vec![0.5]).into()), "[0.5]");
        assert_eq!(write(char_array(vec!['a', 'b']).into()), r#"["a","b"]"#);
    }

    #[test]
    fn non_string_keys_are_coerced() {
        let entity = entity_builder().put(1i32, "one").put(true, "yes").build();
        assert_eq!(write(entity.into()), r#"{"1":"one","true":"yes"}"#);
    }

    #[test]
    fn binary_is_base64() {
        let entity = entity_builder()
            .put("blob", BinaryValue::from(vec![1u8, 2, 3]))
            .build();
        assert_eq!(write(entity.into()), r#"{"blob":"AQID"}"#);
    }

    #[test]
    fn pretty_output_is_indented() {
        let entity = entity_builder().put("a", 1i32).build();
        let text = JsonWriter::pretty().write(&Value::from(entity)).unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn utf16_bytes() {
        let writer = JsonWriter {
            charset: Charset::Utf16Be,
            ..JsonWriter::new()
        };
        assert_eq!(writer.write_bytes(&Value::from(1i64)).unwrap(), vec![0, b'1']);
    }
}
