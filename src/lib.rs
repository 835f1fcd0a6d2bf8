//! # tinygit
//!
//! A content-addressed object store speaking git's loose-object format.
//!
//! Objects are framed as `<type> SP <length> NUL <payload>`, addressed by the
//! SHA-1 of that frame, and stored zlib-compressed under
//! `.git/objects/<2 hex>/<38 hex>`. Commits carry their metadata in the
//! key-value-list-with-message format and link to their parents by address.
//!
//! ## Core Concepts
//!
//! - **Repository**: a working-tree path plus its `.git` directory
//! - **Objects**: blobs (opaque bytes) and commits (KVLM metadata)
//! - **ObjectStore**: write-once, read-many loose object files
//! - **History**: depth-first walk over commit parents
//!
//! ## Example
//!
//! ```ignore
//! use tinygit::{ops, ObjectType, Repository};
//!
//! let repo = Repository::init("my-project")?;
//! let id = ops::hash_object(&repo, "README.md", ObjectType::Blob, true)?;
//! let bytes = ops::cat_file(&repo, &id, None)?;
//! ```

pub mod config;
pub mod model;
pub mod ops;
pub mod store;

mod error;
mod repository;

pub use config::RepoConfig;
pub use error::{Error, Result};
pub use model::{Blob, Commit, Kvlm, Object, ObjectId, ObjectType};
pub use ops::LogEntry;
pub use repository::{Repository, DEFAULT_DESCRIPTION, DEFAULT_HEAD, GIT_DIR};
pub use store::{Frame, ObjectStore};
