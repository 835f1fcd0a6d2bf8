//! Error types for tinygit

use crate::model::ObjectType;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tinygit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tinygit operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Repository already initialized: {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("Not a git repository (or any parent up to /): {}", .0.display())]
    NotARepository(PathBuf),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Decompression failed: {0}")]
    Decompression(String),

    #[error("Malformed object: {0}")]
    MalformedObject(String),

    #[error("Unknown object type: {0}")]
    UnknownObjectType(String),

    #[error("Wrong object type: expected {expected}, found {found}")]
    WrongObjectType {
        expected: ObjectType,
        found: ObjectType,
    },

    #[error("Unsupported object type: {0}")]
    Unsupported(ObjectType),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Config error: {0}")]
    Config(String),
}
