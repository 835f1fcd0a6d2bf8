//! Object plumbing: read an object, hash a file

use crate::model::{Object, ObjectId, ObjectType};
use crate::repository::Repository;
use crate::Result;
use std::path::Path;

/// Read an object and return its serialized payload
///
/// With `expected` set, a stored object of any other type is rejected.
pub fn cat_file(repo: &Repository, id: &ObjectId, expected: Option<ObjectType>) -> Result<Vec<u8>> {
    let store = repo.objects();
    let object = match expected {
        Some(kind) => store.read_typed(id, kind)?,
        None => store.read(id)?,
    };
    Ok(object.serialize())
}

/// Compute the address of a working-tree file as an object of type `kind`
///
/// Relative paths are resolved against the working tree root. The object is
/// written to the store only when `write` is set.
pub fn hash_object(
    repo: &Repository,
    path: impl AsRef<Path>,
    kind: ObjectType,
    write: bool,
) -> Result<ObjectId> {
    let object = Object::from_path(kind, repo.worktree().join(path))?;
    repo.objects().write(&object, write)
}
