//! XML codec wrapper. Write-only, and only entities have an XML projection.

use valtree::xml::from_entity;
use valtree::Value;

use crate::config::CodecConfig;
use crate::error::{MappingError, UnknownFormatError};
use crate::xml::XmlWriter;
use crate::DataFormat;

use super::types::ValueCodec;

#[derive(Debug, Clone)]
pub struct XmlValueCodec {
    pub writer: XmlWriter,
    pub root_tag: String,
}

impl Default for XmlValueCodec {
    fn default() -> Self {
        Self::with_config(&CodecConfig::default())
    }
}

impl XmlValueCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &CodecConfig) -> Self {
        Self {
            writer: XmlWriter::with_config(config),
            root_tag: config.xml_root_tag.clone(),
        }
    }
}

impl ValueCodec for XmlValueCodec {
    fn id(&self) -> &'static str {
        "xml"
    }

    fn format(&self) -> DataFormat {
        DataFormat::Xml
    }

    fn encode(&mut self, value: &Value) -> Result<Vec<u8>, MappingError> {
        let Value::Entity(entity) = value else {
            return Err(UnknownFormatError::Unsupported {
                format: DataFormat::Xml,
                value_type: value.value_type(),
            }
            .into());
        };
        self.writer.write_bytes(&from_entity(self.root_tag.as_str(), entity))
    }

    fn decode(&mut self, _bytes: &[u8]) -> Result<Option<Value>, MappingError> {
        Err(UnknownFormatError::NoDecoder {
            format: DataFormat::Xml,
        }
        .into())
    }
}
