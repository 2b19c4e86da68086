//! JSON reader and writer.

mod error;
mod reader;
mod tokenizer;
mod writer;

pub use error::JsonDecodeError;
pub use reader::{JsonReader, MAX_DEPTH};
pub use tokenizer::{JsonToken, JsonTokenizer};
pub use writer::JsonWriter;
