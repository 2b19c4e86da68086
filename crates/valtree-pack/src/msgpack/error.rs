//! MessagePack decoder error type.

use thiserror::Error;
use valtree_buffers::BufferError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MsgPackError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("invalid MessagePack byte at offset {0}")]
    InvalidByte(usize),
    #[error("unsupported extension type at offset {0}")]
    UnsupportedExtension(usize),
    #[error("value at offset {0} cannot be used as a map key")]
    InvalidKey(usize),
    #[error("integer at offset {0} does not fit in 64 signed bits")]
    IntegerOverflow(usize),
    #[error("container at offset {0} is nested too deeply")]
    DepthLimit(usize),
    #[error("{0} trailing bytes after the value")]
    TrailingBytes(usize),
}

impl From<BufferError> for MsgPackError {
    fn from(error: BufferError) -> Self {
        match error {
            BufferError::EndOfBuffer { .. } => MsgPackError::UnexpectedEof,
            BufferError::InvalidUtf8(_) => MsgPackError::InvalidUtf8,
        }
    }
}
