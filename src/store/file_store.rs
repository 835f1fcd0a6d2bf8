//! Loose-object store: one compressed file per address
//!
//! Layout under the objects directory:
//! ```text
//! objects/
//!   ce/
//!     013625030ba8dba906f756967f9e9ca394464a
//! ```
//! The first two hex characters of the address name a fan-out directory and
//! the remaining 38 name the file.

use crate::model::{Object, ObjectId, ObjectType};
use crate::store::Frame;
use crate::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A content-addressed object store backed by a directory of loose objects
#[derive(Clone, Debug)]
pub struct ObjectStore {
    /// Path to the objects directory
    root: PathBuf,
}

impl ObjectStore {
    /// Open a store rooted at an `objects` directory
    ///
    /// The directory is not required to exist until something is persisted.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ObjectStore { root: root.into() }
    }

    /// Serialize, frame and address an object, persisting it when `persist` is set
    ///
    /// The address is returned whether or not anything is written.
    pub fn write(&self, object: &Object, persist: bool) -> Result<ObjectId> {
        self.write_frame(&Frame::from_object(object), persist)
    }

    /// Address (and optionally persist) an already-framed payload
    pub fn write_frame(&self, frame: &Frame, persist: bool) -> Result<ObjectId> {
        let id = frame.id();
        if !persist {
            debug!(%id, kind = %frame.kind, size = frame.size(), "hashed object");
            return Ok(id);
        }

        let path = self.object_path(&id);
        let dir = self.root.join(id.dir_name());
        std::fs::create_dir_all(&dir)?;

        // Write to a sibling temp file, then rename into place
        let compressed = frame.compress()?;
        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        temp.write_all(&compressed)?;
        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        debug!(%id, kind = %frame.kind, size = frame.size(), path = %path.display(), "wrote object");
        Ok(id)
    }

    /// Load the frame stored at an address
    pub fn read_frame(&self, id: &ObjectId) -> Result<Frame> {
        let path = self.object_path(id);
        let data = match std::fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(id.to_hex()))
            }
            Err(e) => return Err(e.into()),
        };

        let frame = Frame::decompress(&data)?;
        debug!(%id, kind = %frame.kind, size = frame.size(), "read object");
        Ok(frame)
    }

    /// Retrieve an object by address
    pub fn read(&self, id: &ObjectId) -> Result<Object> {
        self.read_frame(id)?.into_object()
    }

    /// Retrieve an object, failing unless its stored tag is `expected`
    pub fn read_typed(&self, id: &ObjectId, expected: ObjectType) -> Result<Object> {
        let frame = self.read_frame(id)?;
        if frame.kind != expected {
            return Err(Error::WrongObjectType {
                expected,
                found: frame.kind,
            });
        }
        frame.into_object()
    }

    /// Check if an address has been persisted
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.object_path(id).is_file()
    }

    /// Filesystem location for an address
    pub fn object_path(&self, id: &ObjectId) -> PathBuf {
        self.root.join(id.dir_name()).join(id.file_name())
    }

    /// Get the objects directory
    pub fn path(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Blob, Commit};
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use tempfile::tempdir;

    const HELLO_ID: &str = "ce013625030ba8dba906f756967f9e9ca394464a";

    fn store_in(dir: &Path) -> ObjectStore {
        ObjectStore::new(dir.join("objects"))
    }

    fn write_raw(store: &ObjectStore, id: &ObjectId, framed: &[u8]) {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(framed).unwrap();
        let path = store.object_path(id);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, encoder.finish().unwrap()).unwrap();
    }

    #[test]
    fn test_hash_without_persisting() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let id = store.write(&Blob::new("hello\n").into(), false).unwrap();

        assert_eq!(id.to_hex(), HELLO_ID);
        assert!(!store.contains(&id));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_persist_uses_fan_out_layout() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let id = store.write(&Blob::new("hello\n").into(), true).unwrap();

        let expected = dir
            .path()
            .join("objects")
            .join("ce")
            .join("013625030ba8dba906f756967f9e9ca394464a");
        assert_eq!(id.to_hex(), HELLO_ID);
        assert!(expected.is_file());
        assert_eq!(std::fs::read_dir(expected.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_back() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let blob: Object = Blob::new(b"\x00binary\xff".to_vec()).into();
        let id = store.write(&blob, true).unwrap();
        assert_eq!(store.read(&id).unwrap(), blob);

        let commit: Object =
            Commit::initial(ObjectId::digest(b"tree"), "a <a@b> 0 +0000", "first\n").into();
        let id = store.write(&commit, true).unwrap();
        assert_eq!(store.read(&id).unwrap(), commit);
    }

    #[test]
    fn test_idempotent_writes() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let blob: Object = Blob::new("duplicate data").into();

        let id1 = store.write(&blob, true).unwrap();
        let bytes1 = std::fs::read(store.object_path(&id1)).unwrap();
        let id2 = store.write(&blob, true).unwrap();
        let bytes2 = std::fs::read(store.object_path(&id2)).unwrap();

        assert_eq!(id1, id2);
        assert_eq!(bytes1, bytes2);
    }

    #[test]
    fn test_read_missing() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let id = ObjectId::from_hex(HELLO_ID).unwrap();

        assert!(matches!(store.read(&id), Err(Error::NotFound(ref h)) if h == HELLO_ID));
    }

    #[test]
    fn test_read_corrupt() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let id = ObjectId::from_hex(HELLO_ID).unwrap();

        let path = store.object_path(&id);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"not zlib at all").unwrap();

        assert!(matches!(store.read(&id), Err(Error::Decompression(_))));
    }

    #[test]
    fn test_read_length_mismatch() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let id = ObjectId::from_hex(HELLO_ID).unwrap();

        write_raw(&store, &id, b"blob 3\0hello\n");

        assert!(matches!(store.read(&id), Err(Error::MalformedObject(_))));
    }

    #[test]
    fn test_read_unknown_type() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let id = ObjectId::from_hex(HELLO_ID).unwrap();

        write_raw(&store, &id, b"widget 6\0hello\n");

        assert!(matches!(store.read(&id), Err(Error::UnknownObjectType(_))));
    }

    #[test]
    fn test_read_tree_is_unsupported() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let frame = Frame::new(ObjectType::Tree, b"entries".to_vec());
        let id = store.write_frame(&frame, true).unwrap();

        assert_eq!(store.read_frame(&id).unwrap(), frame);
        assert!(matches!(
            store.read(&id),
            Err(Error::Unsupported(ObjectType::Tree))
        ));
    }

    #[test]
    fn test_read_typed() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let id = store.write(&Blob::new("hello\n").into(), true).unwrap();

        assert!(store.read_typed(&id, ObjectType::Blob).is_ok());
        assert!(matches!(
            store.read_typed(&id, ObjectType::Commit),
            Err(Error::WrongObjectType {
                expected: ObjectType::Commit,
                found: ObjectType::Blob
            })
        ));
    }
}
