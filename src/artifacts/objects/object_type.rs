use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
            ObjectType::Tag => "tag",
        }
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            "tag" => Ok(ObjectType::Tag),
            _ => Err(Error::InvalidType(value.to_string())),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The `<type> <size>\0` prefix of a decompressed object file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHeader {
    pub kind: ObjectType,
    pub declared_size: usize,
    /// Index of the first payload byte, right after the NUL terminator
    pub payload_offset: usize,
}

impl ObjectHeader {
    /// Parse the header and check the declared size against the payload length
    ///
    /// Scanning stops at the first space and the first NUL after it; there is no
    /// escaping.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let space = data
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| Error::InvalidType(String::from_utf8_lossy(data).into_owned()))?;
        let kind = ObjectType::try_from(String::from_utf8_lossy(&data[..space]).as_ref())?;

        let nul = data[space + 1..]
            .iter()
            .position(|&b| b == b'\0')
            .map(|pos| space + 1 + pos)
            .ok_or_else(|| Error::InvalidSize {
                declared: String::from_utf8_lossy(&data[space + 1..]).into_owned(),
                actual: 0,
            })?;

        let payload_offset = nul + 1;
        let actual = data.len() - payload_offset;
        let size_token = String::from_utf8_lossy(&data[space + 1..nul]).into_owned();

        let declared_size = match size_token.parse::<usize>() {
            Ok(size) if size_token.bytes().all(|b| b.is_ascii_digit()) => size,
            _ => {
                return Err(Error::InvalidSize {
                    declared: size_token,
                    actual,
                });
            }
        };

        if declared_size != actual {
            return Err(Error::InvalidSize {
                declared: size_token,
                actual,
            });
        }

        Ok(Self {
            kind,
            declared_size,
            payload_offset,
        })
    }
}
