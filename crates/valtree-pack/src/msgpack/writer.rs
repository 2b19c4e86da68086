//! Value trees to MessagePack.

use valtree::{ArrayValue, Entity, Primitive, Value};

use super::encoder::MsgPackEncoder;

/// Packs value trees. `None` packs as nil; an empty value packs as zero
/// bytes. Entity fields holding empty values are skipped.
#[derive(Default)]
pub struct MessagePackWriter {
    pub encoder: MsgPackEncoder,
}

impl MessagePackWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write<'a>(&mut self, value: impl Into<Option<&'a Value>>) -> Vec<u8> {
        let value = value.into();
        if value.is_some_and(Value::is_empty) {
            return Vec::new();
        }
        self.encoder.writer.reset();
        match value {
            Some(value) => {
                tracing::trace!(value_type = %value.value_type(), "writing msgpack");
                self.write_any(value);
            }
            None => self.encoder.write_null(),
        }
        self.encoder.writer.flush()
    }

    pub fn write_any(&mut self, value: &Value) {
        match value {
            Value::Primitive(primitive) => self.write_primitive(primitive),
            Value::Entity(entity) => self.write_entity(entity),
            Value::Array(array) => self.write_array(array),
            Value::Binary(binary) => self.encoder.write_bin(binary.content()),
            Value::Map(map) => {
                let pairs: Vec<_> = map.iter().filter(|(_, value)| !value.is_empty()).collect();
                self.encoder.write_obj_hdr(pairs.len());
                for (key, value) in pairs {
                    self.write_key(key);
                    self.write_any(value);
                }
            }
            Value::StringParametersMap(parameters) => {
                self.encoder.write_obj_hdr(parameters.len());
                for (name, value) in parameters.iter() {
                    self.encoder.write_str(name);
                    self.encoder.write_str(value);
                }
            }
        }
    }

    /// Packs a scalar in its native kind. BYTE packs as a one-byte binary.
    pub fn write_primitive(&mut self, primitive: &Primitive) {
        let encoder = &mut self.encoder;
        match *primitive {
            Primitive::String(ref value) => encoder.write_str(value),
            Primitive::Int(value) => encoder.write_integer(value.into()),
            Primitive::Long(value) => encoder.write_integer(value),
            Primitive::Short(value) => encoder.write_integer(value.into()),
            Primitive::Double(value) => encoder.write_f64(value),
            Primitive::Float(value) => encoder.write_f32(value),
            Primitive::Bool(value) => encoder.write_boolean(value),
            Primitive::Byte(value) => encoder.write_bin(&value.to_be_bytes()),
            Primitive::Char(value) => encoder.write_str(value.encode_utf8(&mut [0; 4])),
        }
    }

    /// Packs a map key in its native kind. Unlike values, BYTE keys pack as
    /// integers.
    pub fn write_key(&mut self, key: &Primitive) {
        match *key {
            Primitive::Byte(value) => self.encoder.write_integer(value.into()),
            _ => self.write_primitive(key),
        }
    }

    fn write_entity(&mut self, entity: &Entity) {
        let fields: Vec<(&Primitive, Value)> =
            entity.iter().filter(|(_, value)| !value.is_empty()).collect();
        self.encoder.write_obj_hdr(fields.len());
        for (key, value) in &fields {
            self.write_key(key);
            self.write_any(value);
        }
    }

    fn write_array(&mut self, array: &ArrayValue) {
        let encoder = &mut self.encoder;
        encoder.write_arr_hdr(array.len());
        if let Some(values) = array.ints() {
            values.iter().for_each(|&v| encoder.write_integer(v.into()));
        } else if let Some(values) = array.longs() {
            values.iter().for_each(|&v| encoder.write_integer(v));
        } else if let Some(values) = array.shorts() {
            values.iter().for_each(|&v| encoder.write_integer(v.into()));
        } else if let Some(values) = array.doubles() {
            values.iter().for_each(|&v| encoder.write_f64(v));
        } else if let Some(values) = array.floats() {
            values.iter().for_each(|&v| encoder.write_f32(v));
        } else if let Some(values) = array.bools() {
            values.iter().for_each(|&v| encoder.write_boolean(v));
        } else if let Some(values) = array.bytes() {
            values.iter().for_each(|&v| encoder.write_bin(&v.to_be_bytes()));
        } else if let Some(values) = array.chars() {
            values
                .iter()
                .for_each(|&v| encoder.write_str(v.encode_utf8(&mut [0; 4])));
        } else if let Some(values) = array.values() {
            for value in values {
                self.write_any(value);
            }
        }
    }
}
