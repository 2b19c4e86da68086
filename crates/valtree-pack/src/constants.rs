//! Format identifiers.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownFormatError;

/// Wire format a codec reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
    Json = 0,
    Xml = 1,
    MessagePack = 2,
}

impl DataFormat {
    pub const ALL: [DataFormat; 3] = [DataFormat::Json, DataFormat::Xml, DataFormat::MessagePack];

    pub fn name(self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Xml => "xml",
            DataFormat::MessagePack => "msgpack",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataFormat {
    type Err = UnknownFormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Ok(DataFormat::Json),
            "xml" => Ok(DataFormat::Xml),
            "msgpack" | "messagepack" | "message_pack" => Ok(DataFormat::MessagePack),
            _ => Err(UnknownFormatError::UnknownName(name.to_owned())),
        }
    }
}
