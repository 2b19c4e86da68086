//! Aggregate codec holder.

use valtree::Value;

use crate::config::CodecConfig;
use crate::error::MappingError;
use crate::DataFormat;

use super::{JsonValueCodec, MessagePackValueCodec, ValueCodec, XmlValueCodec};

#[derive(Default)]
pub struct Codecs {
    pub json: JsonValueCodec,
    pub xml: XmlValueCodec,
    pub msgpack: MessagePackValueCodec,
}

impl Codecs {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            json: JsonValueCodec::with_config(config),
            xml: XmlValueCodec::with_config(config),
            msgpack: MessagePackValueCodec::new(),
        }
    }

    pub fn codec(&mut self, format: DataFormat) -> &mut dyn ValueCodec {
        match format {
            DataFormat::Json => &mut self.json,
            DataFormat::Xml => &mut self.xml,
            DataFormat::MessagePack => &mut self.msgpack,
        }
    }

    pub fn encode(&mut self, format: DataFormat, value: &Value) -> Result<Vec<u8>, MappingError> {
        tracing::debug!(%format, value_type = %value.value_type(), "encoding");
        self.codec(format).encode(value)
    }

    pub fn decode(&mut self, format: DataFormat, bytes: &[u8]) -> Result<Option<Value>, MappingError> {
        tracing::debug!(%format, len = bytes.len(), "decoding");
        self.codec(format).decode(bytes)
    }
}
