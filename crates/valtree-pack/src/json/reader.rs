//! JSON input into value trees.
//!
//! Recursive descent over [`JsonTokenizer`] tokens. Objects become entities
//! keyed by STRING primitives; integers become LONG and other numbers FLOAT.
//! Arrays are typed by their first element. Input that turns malformed
//! inside a structure ends the parse and yields what was read so far, and so
//! does nesting deeper than [`MAX_DEPTH`].

use valtree::{
    array, bool_array, empty_array, entity_array, entity_builder, float_array, long_array,
    nested_array, string_array, ArrayValue, Entity, Value,
};

use crate::config::{Charset, CodecConfig};

use super::error::JsonDecodeError;
use super::tokenizer::{JsonToken, JsonTokenizer};

/// Deepest object/array nesting the reader descends into.
pub const MAX_DEPTH: usize = 512;

#[derive(Debug, Clone, Default)]
pub struct JsonReader {
    pub charset: Charset,
    /// Read mixed-kind arrays as heterogeneous collections.
    pub strict_arrays: bool,
}

impl JsonReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &CodecConfig) -> Self {
        Self {
            charset: config.charset,
            strict_arrays: config.strict_arrays,
        }
    }

    /// Decodes `bytes` in the configured charset. Empty input reads as `None`.
    pub fn read(&self, bytes: &[u8]) -> Result<Option<Value>, JsonDecodeError> {
        match self.charset {
            Charset::Utf8 => self.read_utf8(bytes),
            charset => self.read_str(&charset.decode(bytes)?),
        }
    }

    pub fn read_str(&self, json: &str) -> Result<Option<Value>, JsonDecodeError> {
        self.read_utf8(json.as_bytes())
    }

    fn read_utf8(&self, bytes: &[u8]) -> Result<Option<Value>, JsonDecodeError> {
        let mut tokenizer = JsonTokenizer::new(bytes);
        let Some(first) = tokenizer.next_token()? else {
            return Ok(None);
        };
        let mut parser = Parser {
            tokenizer,
            strict_arrays: self.strict_arrays,
            done: false,
            depth: 0,
        };
        Ok(parser.value(first))
    }
}

/// Element kind that types a JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Entity,
    Array,
    Str,
    Long,
    Float,
    Bool,
}

impl Kind {
    fn of(token: &JsonToken) -> Option<Kind> {
        match token {
            JsonToken::BeginObject => Some(Kind::Entity),
            JsonToken::BeginArray => Some(Kind::Array),
            JsonToken::Str(_) => Some(Kind::Str),
            JsonToken::Int(_) => Some(Kind::Long),
            JsonToken::Float(_) => Some(Kind::Float),
            JsonToken::Bool(_) => Some(Kind::Bool),
            _ => None,
        }
    }

    fn build(self, values: Vec<Value>) -> ArrayValue {
        match self {
            Kind::Long => long_array(values.iter().filter_map(Value::as_i64).collect::<Vec<_>>()),
            Kind::Float => float_array(
                values
                    .iter()
                    .filter_map(|value| value.as_primitive()?.as_f32())
                    .collect::<Vec<_>>(),
            ),
            Kind::Bool => bool_array(values.iter().filter_map(Value::as_bool).collect::<Vec<_>>()),
            Kind::Str => string_array(values.iter().filter_map(Value::as_str)),
            Kind::Entity => entity_array(values.into_iter().filter_map(|value| match value {
                Value::Entity(entity) => Some(entity),
                _ => None,
            })),
            Kind::Array => nested_array(values.into_iter().filter_map(|value| match value {
                Value::Array(array) => Some(array),
                _ => None,
            })),
        }
    }
}

struct Parser<'a> {
    tokenizer: JsonTokenizer<'a>,
    strict_arrays: bool,
    done: bool,
    depth: usize,
}

impl Parser<'_> {
    /// Next token; `None` once the input ends or turns malformed.
    fn next(&mut self) -> Option<JsonToken> {
        if self.done {
            return None;
        }
        match self.tokenizer.next_token() {
            Ok(Some(token)) => Some(token),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(error) => {
                tracing::debug!(%error, "json input malformed, keeping partial result");
                self.done = true;
                None
            }
        }
    }

    fn stop(&mut self) {
        tracing::debug!(offset = self.tokenizer.offset(), "unexpected json token, keeping partial result");
        self.done = true;
    }

    /// Value starting with `token`. `null` and stray structural tokens read
    /// as nothing.
    fn value(&mut self, token: JsonToken) -> Option<Value> {
        if !matches!(token, JsonToken::BeginObject | JsonToken::BeginArray) {
            return self.scalar(token);
        }
        if self.depth >= MAX_DEPTH {
            tracing::warn!(depth = self.depth, "json nesting too deep, keeping partial result");
            self.stop();
            return None;
        }
        self.depth += 1;
        let value = match token {
            JsonToken::BeginObject => Some(Value::Entity(self.entity())),
            _ => self.array().map(Value::Array),
        };
        self.depth -= 1;
        value
    }

    fn scalar(&mut self, token: JsonToken) -> Option<Value> {
        match token {
            JsonToken::Str(value) => Some(Value::from(value)),
            JsonToken::Int(value) => Some(Value::from(value)),
            JsonToken::Float(value) => Some(Value::from(value)),
            JsonToken::Bool(value) => Some(Value::from(value)),
            _ => None,
        }
    }

    /// Object body after `{`.
    fn entity(&mut self) -> Entity {
        let mut builder = entity_builder();
        while let Some(token) = self.next() {
            let name = match token {
                JsonToken::EndObject => break,
                JsonToken::Comma => continue,
                JsonToken::Str(name) => name,
                _ => {
                    self.stop();
                    break;
                }
            };
            if self.next() != Some(JsonToken::Colon) {
                self.stop();
                break;
            }
            let Some(token) = self.next() else {
                break;
            };
            let value = self.value(token);
            if name.is_empty() {
                continue;
            }
            if let Some(value) = value {
                builder = builder.put(name, value);
            }
        }
        builder.build()
    }

    /// Array body after `[`. An array whose first element is `null` reads as
    /// nothing.
    fn array(&mut self) -> Option<ArrayValue> {
        let mut token = self.next()?;
        if token == JsonToken::EndArray {
            return Some(empty_array());
        }
        let Some(kind) = Kind::of(&token) else {
            self.skip_array(token);
            return None;
        };
        let mut values = Vec::new();
        loop {
            if Kind::of(&token) != Some(kind) {
                if self.strict_arrays {
                    return Some(self.mixed_array(values, token));
                }
                tracing::warn!(
                    kept = values.len(),
                    "json array mixes element kinds, truncating at the first mismatch"
                );
                self.skip_array(token);
                break;
            }
            if let Some(value) = self.value(token) {
                values.push(value);
            }
            match self.next() {
                Some(JsonToken::Comma) => {}
                Some(JsonToken::EndArray) | None => break,
                Some(_) => {
                    self.stop();
                    break;
                }
            }
            match self.next() {
                Some(next) => token = next,
                None => break,
            }
        }
        Some(kind.build(values))
    }

    fn mixed_array(&mut self, mut values: Vec<Value>, mut token: JsonToken) -> ArrayValue {
        loop {
            if let Some(value) = self.value(token) {
                values.push(value);
            }
            match self.next() {
                Some(JsonToken::Comma) => {}
                Some(JsonToken::EndArray) | None => break,
                Some(_) => {
                    self.stop();
                    break;
                }
            }
            match self.next() {
                Some(next) => token = next,
                None => break,
            }
        }
        array(values)
    }

    /// Discards the rest of the current array, starting at `token`.
    fn skip_array(&mut self, mut token: JsonToken) {
        let mut depth = 0usize;
        loop {
            match token {
                JsonToken::BeginObject | JsonToken::BeginArray => depth += 1,
                JsonToken::EndObject | JsonToken::EndArray => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            match self.next() {
                Some(next) => token = next,
                None => return,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valtree::{CollectionMode, ElementsType};

    fn read(json: &str) -> Option<Value> {
        JsonReader::new().read_str(json).unwrap()
    }

    fn read_entity(json: &str) -> Entity {
        read(json).and_then(|value| value.as_entity().cloned()).unwrap()
    }

    #[test]
    fn objects_become_entities() {
        let entity = read_entity(r#"{"name":"a","count":3,"ratio":0.5,"ok":true}"#);
        assert_eq!(entity.get("name"), Some(Value::from("a")));
        assert_eq!(entity.get("count"), Some(Value::from(3i64)));
        assert_eq!(entity.get("ratio"), Some(Value::from(0.5f32)));
        assert_eq!(entity.get("ok"), Some(Value::from(true)));
    }

    #[test]
    fn nulls_and_empty_names_are_skipped() {
        let entity = read_entity(r#"{"a":null,"":1,"b":2}"#);
        assert!(!entity.has("a"));
        assert!(!entity.has(""));
        assert_eq!(entity.len(), 1);
    }

    #[test]
    fn arrays_are_typed_by_their_first_element() {
        let entity = read_entity(r#"{"l":[1,2],"f":[1.5],"s":["x"],"b":[true,false],"e":[{"a":1}],"n":[[1],[2]]}"#);
        let typed = |key: &str| entity.get(key).unwrap().as_array().cloned().unwrap();
        assert_eq!(typed("l").longs(), Some(&[1i64, 2][..]));
        assert_eq!(typed("f").floats(), Some(&[1.5f32][..]));
        assert_eq!(typed("s").elements_type(), ElementsType::String);
        assert_eq!(typed("b").bools(), Some(&[true, false][..]));
        assert_eq!(typed("e").elements_type(), ElementsType::Entity);
        assert_eq!(typed("n").elements_type(), ElementsType::Array);
        assert_eq!(typed("n").len(), 2);
    }

    #[test]
    fn mixed_arrays_truncate() {
        let entity = read_entity(r#"{"m":[1,"x",2],"after":true}"#);
        let mixed = entity.get("m").unwrap();
        assert_eq!(mixed.as_array().unwrap().longs(), Some(&[1i64][..]));
        assert_eq!(entity.get("after"), Some(Value::from(true)));
    }

    #[test]
    fn strict_mixed_arrays_fall_back_to_collections() {
        let reader = JsonReader {
            strict_arrays: true,
            ..JsonReader::new()
        };
        let value = reader.read_str(r#"[1,"x",{"a":1}]"#).unwrap().unwrap();
        let mixed = value.as_array().unwrap();
        assert_eq!(mixed.collection_mode(), CollectionMode::Collection);
        assert_eq!(mixed.elements_type(), ElementsType::Value);
        assert_eq!(mixed.len(), 3);
        assert_eq!(mixed.get(1), Some(Value::from("x")));
    }

    #[test]
    fn arrays_starting_with_null_read_as_nothing() {
        let entity = read_entity(r#"{"a":[null,1],"b":1}"#);
        assert!(!entity.has("a"));
        assert_eq!(entity.get("b"), Some(Value::from(1i64)));
    }

    #[test]
    fn top_level_scalars() {
        assert_eq!(read(r#""hi""#), Some(Value::from("hi")));
        assert_eq!(read("42"), Some(Value::from(42i64)));
        assert_eq!(read("null"), None);
        assert_eq!(read(""), None);
        assert_eq!(read("   "), None);
        assert_eq!(read("[]"), Some(Value::from(empty_array())));
    }

    #[test]
    fn malformed_structures_yield_partial_results() {
        let entity = read_entity(r#"{"a":1,"b":@}"#);
        assert_eq!(entity.get("a"), Some(Value::from(1i64)));
        assert!(!entity.has("b"));
        let entity = read_entity(r#"{"a":1,"b":[1,2"#);
        assert_eq!(entity.len(), 2);
        let entity = read_entity(r#"{"a":99999999999999999999,"b":1}"#);
        assert!(entity.is_empty());
    }

    #[test]
    fn deep_nesting_keeps_a_bounded_partial_result() {
        let json = "[".repeat(100_000) + &"]".repeat(100_000);
        let mut value = read(&json).unwrap();
        let mut levels = 1;
        while let Some(inner) = value.as_array().and_then(|items| items.get(0)) {
            levels += 1;
            value = inner;
        }
        assert_eq!(levels, MAX_DEPTH);

        let json = r#"{"a":"#.repeat(100_000);
        let entity = read_entity(&json);
        assert!(entity.has("a"));
    }

    #[test]
    fn nesting_up_to_the_limit_is_read_whole() {
        let json = "[".repeat(MAX_DEPTH) + "1" + &"]".repeat(MAX_DEPTH);
        let mut value = read(&json).unwrap();
        for _ in 1..MAX_DEPTH {
            value = value.as_array().unwrap().get(0).unwrap();
        }
        assert_eq!(value.as_array().unwrap().longs(), Some(&[1i64][..]));
    }

    #[test]
    fn malformed_first_token_is_an_error() {
        assert!(JsonReader::new().read_str("@").is_err());
    }

    #[test]
    fn utf16_input() {
        let reader = JsonReader {
            charset: Charset::Utf16Le,
            ..JsonReader::new()
        };
        let bytes = Charset::Utf16Le.encode(r#"{"a":"é"}"#.to_owned());
        let value = reader.read(&bytes).unwrap().unwrap();
        assert_eq!(value.as_entity().unwrap().get("a"), Some(Value::from("é")));
    }
}
