//! History walk: commit ancestry in depth-first order

use crate::model::{ObjectId, ObjectType};
use crate::repository::Repository;
use crate::Result;
use serde::Serialize;
use tracing::debug;

/// One visited commit
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: ObjectId,
    /// First line of the commit message
    pub summary: String,
    /// `None` when the commit carries no committer header
    pub committer: Option<String>,
    pub parents: Vec<ObjectId>,
}

impl LogEntry {
    /// `<id> <summary> by <committer>`
    pub fn line(&self) -> String {
        format!(
            "{} {} by {}",
            self.id,
            self.summary,
            self.committer.as_deref().unwrap_or("(unknown committer)")
        )
    }
}

/// Visit `start` and its ancestors, depth-first, parents in header order
///
/// A commit is reported before any of its parents, and the first parent's
/// whole ancestry is reported before the second parent. Every object reached
/// must be a commit; a missing or non-commit ancestor aborts the walk.
///
/// Commits reachable along several paths are reported once per path. No
/// cycle detection is done, so `limit` is the only bound on a cyclic graph.
/// Returns the number of commits visited.
pub fn walk<F>(repo: &Repository, start: ObjectId, limit: Option<usize>, mut visit: F) -> Result<usize>
where
    F: FnMut(&LogEntry) -> Result<()>,
{
    let store = repo.objects();
    let mut stack = vec![start];
    let mut visited = 0;

    while let Some(id) = stack.pop() {
        if limit.is_some_and(|limit| visited >= limit) {
            debug!(visited, "log limit reached");
            break;
        }

        let commit = store.read_typed(&id, ObjectType::Commit)?.into_commit()?;
        let entry = LogEntry {
            id,
            summary: commit.summary(),
            committer: commit.committer(),
            parents: commit.parents()?,
        };
        visit(&entry)?;
        visited += 1;

        // Reversed so the first parent is popped next
        stack.extend(entry.parents.iter().rev().copied());
    }

    Ok(visited)
}

/// Collect the walk from `start` into a list
pub fn log(repo: &Repository, start: ObjectId, limit: Option<usize>) -> Result<Vec<LogEntry>> {
    let mut entries = Vec::new();
    walk(repo, start, limit, |entry| {
        entries.push(entry.clone());
        Ok(())
    })?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Blob, Commit, Object};
    use crate::Error;
    use tempfile::tempdir;

    const SIG: &str = "Tester <tester@example.com> 1527025044 +0200";

    fn commit(repo: &Repository, parents: Vec<ObjectId>, message: &str) -> ObjectId {
        let tree = ObjectId::digest(b"tree");
        let object: Object = Commit::new(tree, parents, SIG, message).into();
        repo.objects().write(&object, true).unwrap()
    }

    fn ids(entries: &[LogEntry]) -> Vec<ObjectId> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_linear_history() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let root = commit(&repo, vec![], "root\n");
        let second = commit(&repo, vec![root], "second\n\nbody\n");
        let third = commit(&repo, vec![second], "third\n");

        let entries = log(&repo, third, None).unwrap();
        assert_eq!(ids(&entries), vec![third, second, root]);
        assert_eq!(entries[1].summary, "second");
        assert_eq!(entries[1].committer.as_deref(), Some(SIG));
        assert!(entries[2].parents.is_empty());
        assert_eq!(
            entries[0].line(),
            format!("{} third by {}", third, SIG)
        );
    }

    #[test]
    fn test_merge_visits_parents_in_header_order() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let left = commit(&repo, vec![], "left root\n");
        let right = commit(&repo, vec![], "right root\n");
        let merge = commit(&repo, vec![left, right], "merge\n");

        let entries = log(&repo, merge, None).unwrap();
        assert_eq!(ids(&entries), vec![merge, left, right]);
    }

    #[test]
    fn test_first_parent_ancestry_comes_first() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let base = commit(&repo, vec![], "base\n");
        let left = commit(&repo, vec![base], "left\n");
        let right = commit(&repo, vec![], "right\n");
        let merge = commit(&repo, vec![left, right], "merge\n");

        let entries = log(&repo, merge, None).unwrap();
        assert_eq!(ids(&entries), vec![merge, left, base, right]);
    }

    #[test]
    fn test_limit() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let root = commit(&repo, vec![], "root\n");
        let head = commit(&repo, vec![root], "head\n");

        let entries = log(&repo, head, Some(1)).unwrap();
        assert_eq!(ids(&entries), vec![head]);
    }

    #[test]
    fn test_start_must_be_commit() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let blob = repo
            .objects()
            .write(&Blob::new("not a commit").into(), true)
            .unwrap();

        assert!(matches!(
            log(&repo, blob, None),
            Err(Error::WrongObjectType {
                expected: ObjectType::Commit,
                found: ObjectType::Blob
            })
        ));
    }

    #[test]
    fn test_missing_ancestor_aborts() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let ghost = ObjectId::digest(b"never written");
        let head = commit(&repo, vec![ghost], "orphan\n");

        let mut seen = Vec::new();
        let result = walk(&repo, head, None, |entry| {
            seen.push(entry.id);
            Ok(())
        });

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(seen, vec![head]);
    }
}
