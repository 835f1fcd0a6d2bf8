//! Typed objects - the closed set of payloads the store can materialize

use super::{Blob, Commit, ObjectType};
use crate::{Error, Result};
use std::path::Path;

/// A deserialized object
///
/// Only blobs and commits have a realized payload format. Trees and tags are
/// recognized by [`ObjectType`] but cannot be materialized here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Commit(Commit),
}

impl Object {
    /// The type tag written into the frame header
    pub fn fmt(&self) -> ObjectType {
        match self {
            Object::Blob(_) => ObjectType::Blob,
            Object::Commit(_) => ObjectType::Commit,
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        match self {
            Object::Blob(blob) => blob.serialize(),
            Object::Commit(commit) => commit.serialize(),
        }
    }

    /// Build an object of the given type from a raw payload
    pub fn deserialize(kind: ObjectType, data: &[u8]) -> Result<Self> {
        match kind {
            ObjectType::Blob => Ok(Object::Blob(Blob::deserialize(data))),
            ObjectType::Commit => Ok(Object::Commit(Commit::deserialize(data)?)),
            ObjectType::Tree | ObjectType::Tag => Err(Error::Unsupported(kind)),
        }
    }

    /// Read a working-tree file and interpret its contents as `kind`
    pub fn from_path(kind: ObjectType, path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::deserialize(kind, &data)
    }

    pub fn as_commit(&self) -> Option<&Commit> {
        match self {
            Object::Commit(commit) => Some(commit),
            _ => None,
        }
    }

    /// Unwrap a commit, failing with `WrongObjectType` otherwise
    pub fn into_commit(self) -> Result<Commit> {
        match self {
            Object::Commit(commit) => Ok(commit),
            other => Err(Error::WrongObjectType {
                expected: ObjectType::Commit,
                found: other.fmt(),
            }),
        }
    }
}

impl From<Blob> for Object {
    fn from(blob: Blob) -> Self {
        Object::Blob(blob)
    }
}

impl From<Commit> for Object {
    fn from(commit: Commit) -> Self {
        Object::Commit(commit)
    }
}
