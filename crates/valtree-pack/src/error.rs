use std::string::FromUtf8Error;

use valtree::tuple::SchemaMappingError;
use valtree::ValueType;

use crate::config::CharsetError;
use crate::json::JsonDecodeError;
use crate::msgpack::MsgPackError;
use crate::DataFormat;

/// A codec was asked for a format/value combination it does not handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownFormatError {
    #[error("{format} codec cannot encode {value_type} values")]
    Unsupported {
        format: DataFormat,
        value_type: ValueType,
    },
    #[error("{format} codec has no decoder")]
    NoDecoder { format: DataFormat },
    #[error("unknown data format `{0}`")]
    UnknownName(String),
}

/// Encode or decode failure of any codec. Always carries the underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("JSON decoding failed: {0}")]
    JsonDecode(#[from] JsonDecodeError),
    #[error("MessagePack decoding failed: {0}")]
    MsgPack(#[from] MsgPackError),
    #[error("tuple schema mapping failed: {0}")]
    Schema(#[from] SchemaMappingError),
    #[error("output stream failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error("`{0}` is not a valid XML name")]
    InvalidXmlName(String),
    #[error(transparent)]
    Charset(#[from] CharsetError),
    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormatError),
}
