//! JSON codec wrapper.

use valtree::Value;

use crate::config::CodecConfig;
use crate::error::MappingError;
use crate::json::{JsonReader, JsonWriter};
use crate::DataFormat;

use super::types::ValueCodec;

#[derive(Debug, Clone, Default)]
pub struct JsonValueCodec {
    pub writer: JsonWriter,
    pub reader: JsonReader,
}

impl JsonValueCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &CodecConfig) -> Self {
        Self {
            writer: JsonWriter::with_config(config),
            reader: JsonReader::with_config(config),
        }
    }
}

impl ValueCodec for JsonValueCodec {
    fn id(&self) -> &'static str {
        "json"
    }

    fn format(&self) -> DataFormat {
        DataFormat::Json
    }

    fn encode(&mut self, value: &Value) -> Result<Vec<u8>, MappingError> {
        self.writer.write_bytes(value)
    }

    fn decode(&mut self, bytes: &[u8]) -> Result<Option<Value>, MappingError> {
        Ok(self.reader.read(bytes)?)
    }
}
