//! Version-control abstraction layer
//!
//! The bump workflow needs exactly three things from version control:
//! stage every working-tree change, commit, and push. The [Repository]
//! trait captures those (plus a read-only dirty check) so the workflow can
//! run against:
//!
//! - [repository::Git2Repository]: in-process libgit2 via the `git2` crate
//! - [cli::GitCliRepository]: the system `git` executable
//! - [mock::MockRepository]: a recording fake for tests
//!
//! ```rust
//! # use patch_bump::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> patch_bump::Result<()> {
//! repo.stage_all()?;
//! let commit = repo.commit("Bump version to 1.2.4")?;
//! repo.push("origin", "main")?;
//! println!("published {}", commit.short_hash());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod mock;
pub mod repository;

pub use cli::GitCliRepository;
pub use mock::{GitCall, MockRepository};
pub use repository::Git2Repository;

use std::path::Path;

use crate::config::GitBackend;
use crate::error::Result;

/// Commit information reported back to the workflow
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
    /// The commit author
    pub author: String,
}

impl CommitInfo {
    /// First seven characters of the hash.
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

/// Version-control capability used by the bump workflow
///
/// Implementations operate on the repository containing the invocation
/// directory. None of the methods retry, and none roll back earlier steps.
pub trait Repository {
    /// Top-level directory of the working tree; `None` for a bare repository.
    fn workdir(&self) -> Option<&Path>;

    /// Paths (relative to the repository root) with uncommitted changes,
    /// including untracked files. Ignored files are not reported.
    fn dirty_paths(&self) -> Result<Vec<String>>;

    /// Stage every working-tree change: modifications, new files and deletions.
    fn stage_all(&self) -> Result<()>;

    /// Commit the staged tree on the current branch.
    ///
    /// # Returns
    /// * `Ok(CommitInfo)` - The commit that was created
    /// * `Err` - If no author identity is configured or the commit cannot be written
    fn commit(&self, message: &str) -> Result<CommitInfo>;

    /// Push the current branch to `refs/heads/<branch>` on `remote`.
    ///
    /// # Returns
    /// * `Ok(())` - The remote accepted the update
    /// * `Err` - If the remote is unknown, unreachable, or rejects the update
    fn push(&self, remote: &str, branch: &str) -> Result<()>;
}

impl<R: Repository + ?Sized> Repository for Box<R> {
    fn workdir(&self) -> Option<&Path> {
        (**self).workdir()
    }

    fn dirty_paths(&self) -> Result<Vec<String>> {
        (**self).dirty_paths()
    }

    fn stage_all(&self) -> Result<()> {
        (**self).stage_all()
    }

    fn commit(&self, message: &str) -> Result<CommitInfo> {
        (**self).commit(message)
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        (**self).push(remote, branch)
    }
}

/// Opens the repository containing `path` with the configured backend.
pub fn open_repository(backend: GitBackend, path: impl AsRef<Path>) -> Result<Box<dyn Repository>> {
    match backend {
        GitBackend::Libgit2 => Ok(Box::new(Git2Repository::open(path)?)),
        GitBackend::Cli => Ok(Box::new(GitCliRepository::open(path)?)),
    }
}
