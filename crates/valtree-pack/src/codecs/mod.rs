//! Byte-level codecs behind one trait, selectable by [`DataFormat`](crate::DataFormat).

mod json;
mod msgpack;
mod registry;
mod types;
mod xml;

pub use json::JsonValueCodec;
pub use msgpack::MessagePackValueCodec;
pub use registry::Codecs;
pub use types::ValueCodec;
pub use xml::XmlValueCodec;
