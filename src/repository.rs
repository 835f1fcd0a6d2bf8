//! Repository handle
//!
//! A repository is nothing more than a pair of paths: the working tree and
//! the metadata directory inside it. Every operation takes the handle as an
//! explicit argument.

use crate::config::{RepoConfig, REPOSITORY_FORMAT_VERSION};
use crate::store::ObjectStore;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the metadata directory inside a working tree
pub const GIT_DIR: &str = ".git";

/// Contents of `.git/description` for a new repository
pub const DEFAULT_DESCRIPTION: &str = "A Git Repository";

/// Contents of `.git/HEAD` for a new repository
pub const DEFAULT_HEAD: &str = "ref: refs/heads/master\n";

/// Directories created under the metadata directory by [`Repository::init`]
const SKELETON_DIRS: [&str; 4] = ["branches", "objects", "refs/tags", "refs/heads"];

/// Location of a repository on disk
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repository {
    worktree: PathBuf,
    gitdir: PathBuf,
}

impl Repository {
    /// Build a handle for `path` without touching the filesystem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let worktree = path.as_ref().to_path_buf();
        let gitdir = worktree.join(GIT_DIR);
        Repository { worktree, gitdir }
    }

    /// Create a new repository at `path`
    ///
    /// The working tree is created if missing. Fails if `path` is not a
    /// directory or already holds a non-empty metadata directory.
    pub fn init(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Self::load(path);

        if repo.worktree.exists() {
            if !repo.worktree.is_dir() {
                return Err(Error::NotADirectory(repo.worktree));
            }
        } else {
            std::fs::create_dir_all(&repo.worktree)?;
        }

        if repo.gitdir.exists()
            && (!repo.gitdir.is_dir() || std::fs::read_dir(&repo.gitdir)?.next().is_some())
        {
            return Err(Error::AlreadyInitialized(repo.gitdir));
        }

        for dir in SKELETON_DIRS {
            std::fs::create_dir_all(repo.gitdir.join(dir))?;
        }
        std::fs::write(repo.gitdir.join("description"), DEFAULT_DESCRIPTION)?;
        std::fs::write(repo.gitdir.join("HEAD"), DEFAULT_HEAD)?;
        RepoConfig::default().save(repo.gitdir.join("config"))?;

        info!(gitdir = %repo.gitdir.display(), "initialized empty repository");
        Ok(repo)
    }

    /// Open an existing repository rooted exactly at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Self::load(path);
        if !repo.gitdir.is_dir() {
            return Err(Error::NotARepository(repo.worktree));
        }

        let config = repo.config()?;
        if config.repository_format_version != REPOSITORY_FORMAT_VERSION {
            return Err(Error::VersionMismatch {
                expected: REPOSITORY_FORMAT_VERSION,
                found: config.repository_format_version,
            });
        }

        debug!(worktree = %repo.worktree.display(), "opened repository");
        Ok(repo)
    }

    /// Find the repository containing `start`, searching upwards
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        let start = start.as_ref();
        let mut current = std::fs::canonicalize(start)?;
        loop {
            if current.join(GIT_DIR).is_dir() {
                return Self::open(&current);
            }
            if !current.pop() {
                return Err(Error::NotARepository(start.to_path_buf()));
            }
        }
    }

    /// Root of the working tree
    pub fn worktree(&self) -> &Path {
        &self.worktree
    }

    /// The metadata directory
    pub fn gitdir(&self) -> &Path {
        &self.gitdir
    }

    /// Path of `rel` inside the metadata directory
    pub fn git_path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.gitdir.join(rel)
    }

    /// The loose-object store under `objects/`
    pub fn objects(&self) -> ObjectStore {
        ObjectStore::new(self.git_path("objects"))
    }

    /// Parse `config`
    pub fn config(&self) -> Result<RepoConfig> {
        RepoConfig::load(self.git_path("config"))
    }
}
