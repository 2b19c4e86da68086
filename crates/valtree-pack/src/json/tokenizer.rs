//! Byte-level JSON tokenizer.

use super::error::JsonDecodeError;

/// One lexical JSON token.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonToken {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    Colon,
    Comma,
    Str(String),
    /// A number without fraction or exponent.
    Int(i64),
    /// Any other number, read at single precision.
    Float(f32),
    Bool(bool),
    Null,
}

pub struct JsonTokenizer<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> JsonTokenizer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        let x = if data.starts_with(&[0xef, 0xbb, 0xbf]) { 3 } else { 0 };
        Self { data, x }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.x
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<JsonToken>, JsonDecodeError> {
        self.skip_whitespace();
        let Some(&byte) = self.data.get(self.x) else {
            return Ok(None);
        };
        let token = match byte {
            b'{' => self.single(JsonToken::BeginObject),
            b'}' => self.single(JsonToken::EndObject),
            b'[' => self.single(JsonToken::BeginArray),
            b']' => self.single(JsonToken::EndArray),
            b':' => self.single(JsonToken::Colon),
            b',' => self.single(JsonToken::Comma),
            b'"' => self.string()?,
            b't' => self.literal(b"true", JsonToken::Bool(true))?,
            b'f' => self.literal(b"false", JsonToken::Bool(false))?,
            b'n' => self.literal(b"null", JsonToken::Null)?,
            b'-' | b'0'..=b'9' => self.number()?,
            _ => return Err(JsonDecodeError::Invalid(self.x)),
        };
        Ok(Some(token))
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.data.get(self.x).copied() {
            self.x += 1;
        }
    }

    fn single(&mut self, token: JsonToken) -> JsonToken {
        self.x += 1;
        token
    }

    fn literal(&mut self, text: &[u8], token: JsonToken) -> Result<JsonToken, JsonDecodeError> {
        if !self.data[self.x..].starts_with(text) {
            return Err(JsonDecodeError::Invalid(self.x));
        }
        self.x += text.len();
        Ok(token)
    }

    fn string(&mut self) -> Result<JsonToken, JsonDecodeError> {
        let start = self.x;
        let end = find_ending_quote(self.data, start + 1)
            .ok_or(JsonDecodeError::UnterminatedString(start))?;
        let text: String = serde_json::from_slice(&self.data[start..=end])?;
        self.x = end + 1;
        Ok(JsonToken::Str(text))
    }

    fn number(&mut self) -> Result<JsonToken, JsonDecodeError> {
        let start = self.x;
        let mut fractional = false;
        while let Some(&byte) = self.data.get(self.x) {
            match byte {
                b'0'..=b'9' | b'-' | b'+' => {}
                b'.' | b'e' | b'E' => fractional = true,
                _ => break,
            }
            self.x += 1;
        }
        let lexeme = std::str::from_utf8(&self.data[start..self.x])
            .map_err(|_| JsonDecodeError::Invalid(start))?;
        if fractional {
            return lexeme
                .parse::<f32>()
                .map(JsonToken::Float)
                .map_err(|_| JsonDecodeError::Invalid(start));
        }
        match lexeme.parse::<i64>() {
            Ok(value) => Ok(JsonToken::Int(value)),
            Err(_) if lexeme.len() > 1 && lexeme.bytes().skip(1).all(|b| b.is_ascii_digit()) => {
                Err(JsonDecodeError::NumberOutOfRange(start))
            }
            Err(_) => Err(JsonDecodeError::Invalid(start)),
        }
    }
}

/// Position of the closing `"` of a string whose contents start at `x`.
/// A backslash escapes the next byte; a doubled backslash escapes nothing.
fn find_ending_quote(data: &[u8], mut x: usize) -> Option<usize> {
    let mut escaped = false;
    while let Some(&byte) = data.get(x) {
        match byte {
            b'"' if !escaped => return Some(x),
            b'\\' => escaped = !escaped,
            _ => escaped = false,
        }
        x += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<JsonToken> {
        let mut tokenizer = JsonTokenizer::new(input.as_bytes());
        let mut out = Vec::new();
        while let Some(token) = tokenizer.next_token().unwrap() {
            out.push(token);
        }
        out
    }

    #[test]
    fn structural_and_scalar_tokens() {
        assert_eq!(
            tokens(r#"{"a": [1, -2.5, true, null]}"#),
            vec![
                JsonToken::BeginObject,
                JsonToken::Str("a".into()),
                JsonToken::Colon,
                JsonToken::BeginArray,
                JsonToken::Int(1),
                JsonToken::Comma,
                JsonToken::Float(-2.5),
                JsonToken::Comma,
                JsonToken::Bool(true),
                JsonToken::Comma,
                JsonToken::Null,
                JsonToken::EndArray,
                JsonToken::EndObject,
            ]
        );
    }

    #[test]
    fn strings_are_unescaped() {
        assert_eq!(
            tokens(r#""a\"b\\" "é\n""#),
            vec![JsonToken::Str("a\"b\\".into()), JsonToken::Str("é\n".into())]
        );
    }

    #[test]
    fn exponents_read_as_float() {
        assert_eq!(tokens("1e3"), vec![JsonToken::Float(1000.0)]);
    }

    #[test]
    fn malformed_input() {
        let mut tokenizer = JsonTokenizer::new(b"@");
        assert!(matches!(tokenizer.next_token(), Err(JsonDecodeError::Invalid(0))));
        let mut tokenizer = JsonTokenizer::new(b"\"open");
        assert!(matches!(
            tokenizer.next_token(),
            Err(JsonDecodeError::UnterminatedString(0))
        ));
        let mut tokenizer = JsonTokenizer::new(b"99999999999999999999");
        assert!(matches!(
            tokenizer.next_token(),
            Err(JsonDecodeError::NumberOutOfRange(0))
        ));
        let mut tokenizer = JsonTokenizer::new(b"tru");
        assert!(tokenizer.next_token().is_err());
    }

    #[test]
    fn byte_order_mark_is_skipped() {
        let mut tokenizer = JsonTokenizer::new(b"\xef\xbb\xbf1");
        assert_eq!(tokenizer.next_token().unwrap(), Some(JsonToken::Int(1)));
        assert_eq!(tokenizer.offset(), 4);
    }
}
