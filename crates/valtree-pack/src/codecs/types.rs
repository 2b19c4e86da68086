//! Common codec trait.

use valtree::Value;

use crate::error::MappingError;
use crate::DataFormat;

/// A bidirectional bytes/value mapping for one [`DataFormat`].
pub trait ValueCodec {
    fn id(&self) -> &'static str;
    fn format(&self) -> DataFormat;
    fn encode(&mut self, value: &Value) -> Result<Vec<u8>, MappingError>;
    fn decode(&mut self, bytes: &[u8]) -> Result<Option<Value>, MappingError>;
}
