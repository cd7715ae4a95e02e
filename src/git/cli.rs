//! Repository backend that shells out to the system `git` binary,
//! inheriting the user's git config, SSH agent, and credential helpers.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{BumpError, Result};
use crate::git::{CommitInfo, Repository};

/// Runs `git` inside the repository's top-level directory
pub struct GitCliRepository {
    workdir: PathBuf,
}

impl GitCliRepository {
    /// Locates the repository containing `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let toplevel = run_git(path.as_ref(), &["rev-parse", "--show-toplevel"], "locate repository")?;

        Ok(GitCliRepository {
            workdir: PathBuf::from(toplevel),
        })
    }

    fn git(&self, args: &[&str], operation: &str) -> Result<String> {
        run_git(&self.workdir, args, operation)
    }
}

impl Repository for GitCliRepository {
    fn workdir(&self) -> Option<&Path> {
        Some(&self.workdir)
    }

    fn dirty_paths(&self) -> Result<Vec<String>> {
        let status = self.git(
            &["status", "--porcelain", "-z", "--untracked-files=all"],
            "status",
        )?;

        Ok(parse_porcelain_z(&status))
    }

    fn stage_all(&self) -> Result<()> {
        self.git(&["add", "-A"], "stage files")?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<CommitInfo> {
        self.git(&["commit", "-m", message], "create commit")?;
        let hash = self.git(&["rev-parse", "HEAD"], "read commit id")?;
        let author = self.git(&["log", "-1", "--format=%an"], "read commit author")?;

        debug!(commit = %hash, "created commit");

        Ok(CommitInfo {
            hash,
            message: message.to_string(),
            author,
        })
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        let refspec = format!("HEAD:refs/heads/{}", branch);
        debug!(remote, %refspec, "pushing");

        self.git(&["push", remote, &refspec], "push")?;
        Ok(())
    }
}

/// Extracts the paths from `git status --porcelain -z` output.
///
/// Entries are `XY <path>` separated by NUL, with paths unquoted. A rename
/// or copy entry is followed by an extra field holding the source path,
/// which is skipped so only the new path is reported.
fn parse_porcelain_z(output: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut fields = output.split('\0');

    while let Some(entry) = fields.next() {
        let (Some(status), Some(path)) = (entry.get(..2), entry.get(3..)) else {
            continue;
        };
        if path.is_empty() {
            continue;
        }

        if status.contains(&['R', 'C'][..]) {
            fields.next();
        }
        paths.push(path.to_string());
    }

    paths
}

/// Run a git command and return its trimmed stdout or a descriptive error.
fn run_git(dir: &Path, args: &[&str], operation: &str) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| BumpError::command(format!("Failed to run git {}: {}", operation, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BumpError::command(format!(
            "git {} failed: {}",
            operation,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
}
