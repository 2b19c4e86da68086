//! Binary buffer utilities for valtree codecs.
//!
//! - [`Writer`] - writes big-endian binary data into an auto-growing buffer
//! - [`Reader`] - reads binary data from a byte slice with cursor tracking and
//!   bounds checks
//!
//! # Example
//!
//! ```
//! use valtree_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! writer.utf8("hello");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.u16().unwrap(), 0x0203);
//! assert_eq!(reader.utf8(5).unwrap(), "hello");
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("end of buffer: needed {needed} bytes at offset {offset}")]
    EndOfBuffer { offset: usize, needed: usize },
    /// Invalid UTF-8 sequence.
    #[error("invalid UTF-8 sequence at offset {0}")]
    InvalidUtf8(usize),
}
