//! Commit type - KVLM metadata linking a tree to its parents

use super::{Kvlm, ObjectId};
use crate::{Error, Result};

/// A commit: an ordered set of headers plus a free-text message
///
/// Parents are stored as addresses, never as loaded objects, so a commit
/// value is self-contained and the history graph is only materialized when
/// it is walked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Commit {
    kvlm: Kvlm,
}

impl Commit {
    /// Create a commit from its parts
    ///
    /// `signature` is used for both the author and committer lines and is
    /// expected in the usual `Name <email> timestamp tz` layout.
    pub fn new(
        tree: ObjectId,
        parents: Vec<ObjectId>,
        signature: &str,
        message: impl Into<Vec<u8>>,
    ) -> Self {
        let mut kvlm = Kvlm::new().with_message(message);
        kvlm.insert("tree", tree.to_hex());
        for parent in parents {
            kvlm.insert("parent", parent.to_hex());
        }
        kvlm.insert("author", signature);
        kvlm.insert("committer", signature);
        Commit { kvlm }
    }

    /// Create the initial commit (no parents)
    pub fn initial(tree: ObjectId, signature: &str, message: impl Into<Vec<u8>>) -> Self {
        Self::new(tree, vec![], signature, message)
    }

    /// Create a commit with a single parent
    pub fn child(
        tree: ObjectId,
        parent: ObjectId,
        signature: &str,
        message: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(tree, vec![parent], signature, message)
    }

    /// Create a merge commit
    pub fn merge(
        tree: ObjectId,
        parents: Vec<ObjectId>,
        signature: &str,
        message: impl Into<Vec<u8>>,
    ) -> Self {
        assert!(
            parents.len() >= 2,
            "merge commit requires at least 2 parents"
        );
        Self::new(tree, parents, signature, message)
    }

    pub fn from_kvlm(kvlm: Kvlm) -> Self {
        Commit { kvlm }
    }

    pub fn kvlm(&self) -> &Kvlm {
        &self.kvlm
    }

    pub fn into_kvlm(self) -> Kvlm {
        self.kvlm
    }

    pub fn serialize(&self) -> Vec<u8> {
        self.kvlm.serialize()
    }

    pub fn deserialize(data: &[u8]) -> Result<Self> {
        Ok(Commit {
            kvlm: Kvlm::parse(data)?,
        })
    }

    /// The tree this commit snapshots, if the header is present
    pub fn tree(&self) -> Result<Option<ObjectId>> {
        self.kvlm.first(b"tree").map(parse_id).transpose()
    }

    /// Parent addresses in header order
    pub fn parents(&self) -> Result<Vec<ObjectId>> {
        self.kvlm
            .get(b"parent")
            .unwrap_or_default()
            .iter()
            .map(|value| parse_id(value))
            .collect()
    }

    pub fn author(&self) -> Option<String> {
        self.kvlm
            .first(b"author")
            .map(|v| String::from_utf8_lossy(v).into_owned())
    }

    pub fn committer(&self) -> Option<String> {
        self.kvlm
            .first(b"committer")
            .map(|v| String::from_utf8_lossy(v).into_owned())
    }

    pub fn message(&self) -> &[u8] {
        self.kvlm.message()
    }

    /// First line of the message
    pub fn summary(&self) -> String {
        let message = String::from_utf8_lossy(self.kvlm.message());
        message.lines().next().unwrap_or_default().to_string()
    }

    /// Check if this is a root commit
    pub fn is_initial(&self) -> bool {
        !self.kvlm.contains_key(b"parent")
    }

    /// Check if this is a merge commit
    pub fn is_merge(&self) -> bool {
        self.kvlm.get(b"parent").map_or(false, |p| p.len() > 1)
    }
}

fn parse_id(value: &[u8]) -> Result<ObjectId> {
    let hex = std::str::from_utf8(value).map_err(|_| {
        Error::MalformedObject(format!(
            "non-ascii object reference: {}",
            String::from_utf8_lossy(value)
        ))
    })?;
    ObjectId::from_hex(hex.trim())
        .map_err(|e| Error::MalformedObject(format!("bad object reference {}: {}", hex, e)))
}
