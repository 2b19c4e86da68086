//! Per-call codec configuration.

use serde::{Deserialize, Serialize};

/// Text encoding of JSON and XML byte output (and JSON byte input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Charset {
    #[default]
    #[serde(rename = "UTF-8", alias = "utf-8", alias = "utf8")]
    Utf8,
    #[serde(rename = "UTF-16BE", alias = "utf-16be")]
    Utf16Be,
    #[serde(rename = "UTF-16LE", alias = "utf-16le")]
    Utf16Le,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("input is not valid {charset}")]
pub struct CharsetError {
    pub charset: &'static str,
}

impl Charset {
    /// Name used in the XML declaration.
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf16Le => "UTF-16LE",
        }
    }

    pub fn encode(self, text: String) -> Vec<u8> {
        match self {
            Charset::Utf8 => text.into_bytes(),
            Charset::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Charset::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<String, CharsetError> {
        let error = || CharsetError {
            charset: self.name(),
        };
        let units = |to_u16: fn([u8; 2]) -> u16| -> Result<Vec<u16>, CharsetError> {
            if bytes.len() % 2 != 0 {
                return Err(error());
            }
            Ok(bytes
                .chunks_exact(2)
                .map(|pair| to_u16([pair[0], pair[1]]))
                .collect())
        };
        match self {
            Charset::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|_| error()),
            Charset::Utf16Be => String::from_utf16(&units(u16::from_be_bytes)?).map_err(|_| error()),
            Charset::Utf16Le => String::from_utf16(&units(u16::from_le_bytes)?).map_err(|_| error()),
        }
    }
}

/// Options shared by every codec. Passed explicitly; nothing is read from
/// global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub charset: Charset,
    /// Indent JSON output.
    pub pretty: bool,
    /// Read mixed-kind JSON arrays as heterogeneous collections instead of
    /// truncating them at the first mismatching element.
    pub strict_arrays: bool,
    /// Root element name used when the XML codec projects an entity.
    pub xml_root_tag: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            charset: Charset::Utf8,
            pretty: false,
            strict_arrays: false,
            xml_root_tag: "root".to_owned(),
        }
    }
}
