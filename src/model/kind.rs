//! Object type tags

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// The closed set of type tags an object frame may carry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// Opaque file contents
    Blob,
    /// Commit metadata (a KVLM payload)
    Commit,
    /// Directory listing
    Tree,
    /// Annotated tag
    Tag,
}

impl ObjectType {
    pub const ALL: [ObjectType; 4] = [
        ObjectType::Blob,
        ObjectType::Commit,
        ObjectType::Tree,
        ObjectType::Tag,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
            ObjectType::Tree => "tree",
            ObjectType::Tag => "tag",
        }
    }

    pub fn as_bytes(&self) -> &'static [u8] {
        self.as_str().as_bytes()
    }

    /// Match a raw tag taken from a frame header
    pub fn from_bytes(tag: &[u8]) -> Result<Self> {
        match tag {
            b"blob" => Ok(ObjectType::Blob),
            b"commit" => Ok(ObjectType::Commit),
            b"tree" => Ok(ObjectType::Tree),
            b"tag" => Ok(ObjectType::Tag),
            other => Err(Error::UnknownObjectType(
                String::from_utf8_lossy(other).into_owned(),
            )),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bytes(s.as_bytes())
    }
}
