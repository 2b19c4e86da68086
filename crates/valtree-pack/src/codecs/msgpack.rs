//! MessagePack codec wrapper.

use valtree::Value;

use crate::error::MappingError;
use crate::msgpack::{MessagePackReader, MessagePackWriter};
use crate::DataFormat;

use super::types::ValueCodec;

#[derive(Default)]
pub struct MessagePackValueCodec {
    pub writer: MessagePackWriter,
    pub reader: MessagePackReader,
}

impl MessagePackValueCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ValueCodec for MessagePackValueCodec {
    fn id(&self) -> &'static str {
        "msgpack"
    }

    fn format(&self) -> DataFormat {
        DataFormat::MessagePack
    }

    fn encode(&mut self, value: &Value) -> Result<Vec<u8>, MappingError> {
        Ok(self.writer.write(value))
    }

    fn decode(&mut self, bytes: &[u8]) -> Result<Option<Value>, MappingError> {
        Ok(self.reader.read(bytes)?)
    }
}
