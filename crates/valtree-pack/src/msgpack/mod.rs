//! MessagePack codec for value trees.
//!
//! Entity keys keep their primitive kind on the wire: an INT key is packed as
//! an integer, not as its string form.

mod constants;
mod encoder;
mod error;
mod reader;
mod writer;

pub use encoder::MsgPackEncoder;
pub use error::MsgPackError;
pub use reader::{MessagePackReader, MAX_DEPTH};
pub use writer::MessagePackWriter;
