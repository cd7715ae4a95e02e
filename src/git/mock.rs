use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use crate::error::{BumpError, Result};
use crate::git::{CommitInfo, Repository};

/// A version-control call recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    StageAll,
    Commit(String),
    Push { remote: String, branch: String },
}

/// Mock repository for testing without actual git operations
///
/// Records every call in order so tests can assert the exact sequence.
pub struct MockRepository {
    calls: RefCell<Vec<GitCall>>,
    workdir: Option<PathBuf>,
    dirty: Vec<String>,
    push_failure: Option<String>,
    next_commit: Cell<u32>,
}

impl MockRepository {
    /// Create a new clean mock repository whose pushes succeed
    pub fn new() -> Self {
        MockRepository {
            calls: RefCell::new(Vec::new()),
            workdir: None,
            dirty: Vec::new(),
            push_failure: None,
            next_commit: Cell::new(1),
        }
    }

    /// Treat `dir` as the working tree root
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    /// Report these paths as uncommitted changes
    pub fn with_dirty_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirty = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Make every push fail with the given reason
    pub fn failing_push(mut self, reason: impl Into<String>) -> Self {
        self.push_failure = Some(reason.into());
        self
    }

    /// All recorded calls, oldest first
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.borrow().clone()
    }

    /// Messages of the commits created so far, oldest first
    pub fn commit_messages(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                GitCall::Commit(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }

    fn dirty_paths(&self) -> Result<Vec<String>> {
        Ok(self.dirty.clone())
    }

    fn stage_all(&self) -> Result<()> {
        self.calls.borrow_mut().push(GitCall::StageAll);
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<CommitInfo> {
        let n = self.next_commit.get();
        self.next_commit.set(n + 1);
        self.calls
            .borrow_mut()
            .push(GitCall::Commit(message.to_string()));

        Ok(CommitInfo {
            hash: format!("{:040x}", n),
            message: message.to_string(),
            author: "Mock Author".to_string(),
        })
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.calls.borrow_mut().push(GitCall::Push {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });

        match &self.push_failure {
            Some(reason) => Err(BumpError::command(reason.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls_in_order() {
        let repo = MockRepository::new();
        repo.stage_all().unwrap();
        repo.commit("Bump version to 1.0.1").unwrap();
        repo.push("origin", "main").unwrap();

        assert_eq!(
            repo.calls(),
            vec![
                GitCall::StageAll,
                GitCall::Commit("Bump version to 1.0.1".to_string()),
                GitCall::Push {
                    remote: "origin".to_string(),
                    branch: "main".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_mock_commits_get_distinct_hashes() {
        let repo = MockRepository::new();
        let first = repo.commit("one").unwrap();
        let second = repo.commit("two").unwrap();

        assert_ne!(first.hash, second.hash);
        assert_eq!(first.hash.len(), 40);
        assert_eq!(repo.commit_messages(), vec!["one", "two"]);
    }

    #[test]
    fn test_mock_failing_push_still_records_call() {
        let repo = MockRepository::new().failing_push("rejected");
        let result = repo.push("origin", "main");

        assert!(result.is_err());
        assert_eq!(repo.calls().len(), 1);
    }

    #[test]
    fn test_mock_dirty_paths() {
        let repo = MockRepository::new().with_dirty_paths(["CHANGELOG.md"]);
        assert_eq!(repo.dirty_paths().unwrap(), vec!["CHANGELOG.md"]);
        assert!(MockRepository::default().dirty_paths().unwrap().is_empty());
    }
}
