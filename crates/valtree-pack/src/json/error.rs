//! JSON decoder error type.

use thiserror::Error;

use crate::config::CharsetError;

#[derive(Debug, Error)]
pub enum JsonDecodeError {
    #[error("invalid JSON at byte {0}")]
    Invalid(usize),
    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),
    #[error("number at byte {0} is out of range")]
    NumberOutOfRange(usize),
    #[error("string parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Charset(#[from] CharsetError),
}
