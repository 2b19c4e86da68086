//! Codecs for [`valtree`] value trees: JSON in both directions, XML out,
//! MessagePack in both directions, and tuple-store records.
//!
//! Every codec is configured explicitly through a [`CodecConfig`] and
//! allocates its own output per call, so codecs can be used from any number
//! of threads.
//!
//! ```
//! use valtree::{entity_builder, string_array, Value};
//!
//! let entity = entity_builder()
//!     .put("name", "a")
//!     .put("count", 3i32)
//!     .put("tags", string_array(["x", "y"]))
//!     .build();
//! let json = valtree_pack::write_json(&Value::from(entity)).unwrap();
//! assert_eq!(json, r#"{"name":"a","count":3,"tags":["x","y"]}"#);
//! ```

mod config;
mod constants;
mod error;
mod record;
mod stream;

pub mod codecs;
pub mod json;
pub mod msgpack;
pub mod xml;

pub use config::{Charset, CharsetError, CodecConfig};
pub use constants::DataFormat;
pub use error::{MappingError, UnknownFormatError};
pub use record::{read_record, write_record};
pub use stream::ScopedStream;
pub use valtree::tuple::{from_tuple, to_tuple};

use valtree::xml::XmlEntity;
use valtree::Value;

/// Compact UTF-8 JSON for `value`.
pub fn write_json(value: &Value) -> Result<String, MappingError> {
    json::JsonWriter::new().write(value)
}

pub fn read_json(input: &str) -> Result<Option<Value>, MappingError> {
    Ok(json::JsonReader::new().read_str(input)?)
}

/// A complete UTF-8 XML document for `entity`.
pub fn write_xml(entity: &XmlEntity) -> Result<String, MappingError> {
    xml::XmlWriter::new().write(entity)
}

pub fn write_message_pack(value: &Value) -> Vec<u8> {
    msgpack::MessagePackWriter::new().write(value)
}

pub fn read_message_pack(bytes: &[u8]) -> Result<Option<Value>, MappingError> {
    Ok(msgpack::MessagePackReader::new().read(bytes)?)
}
