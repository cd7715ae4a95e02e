use std::path::Path;

use git2::{
    Cred, CredentialType, ErrorClass, ErrorCode, IndexAddOption, PushOptions, RemoteCallbacks,
    Repository as Git2Repo, Status, StatusOptions,
};
use tracing::debug;

use crate::error::{BumpError, Result};
use crate::git::CommitInfo;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn dirty_paths(&self) -> Result<Vec<String>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(statuses
            .iter()
            .filter(|entry| entry.status() != Status::CURRENT)
            .filter_map(|entry| entry.path().map(|p| p.to_string()))
            .collect())
    }

    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;

        // add_all picks up new and modified files, update_all removes deleted ones
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"], None)?;
        index.write()?;

        debug!(entries = index.len(), "staged working tree");
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<CommitInfo> {
        let signature = self.repo.signature().map_err(|e| {
            BumpError::command(format!("No commit author configured (user.name/user.email): {}", e))
        })?;

        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

        debug!(commit = %oid, "created commit");

        Ok(CommitInfo {
            hash: oid.to_string(),
            message: message.to_string(),
            author: signature.name().unwrap_or("unknown").to_string(),
        })
    }

    fn push(&self, remote_name: &str, branch: &str) -> Result<()> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(BumpError::command("HEAD is detached; nothing to push"));
        }
        let local_ref = head
            .name()
            .ok_or_else(|| BumpError::command("Current branch name is not valid UTF-8"))?
            .to_string();

        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| BumpError::command(format!("No remote named '{}' found", remote_name)))?;

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(CredentialType::SSH_KEY) {
                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }

                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }

            Cred::default()
        });

        // A rejected reference update does not fail remote.push on its own
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("{}:refs/heads/{}", local_ref, branch);
        debug!(remote = remote_name, %refspec, "pushing");

        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                ErrorClass::Net => BumpError::command(format!("Network error during push: {}", e)),
                ErrorClass::Reference => {
                    BumpError::command(format!("Reference error during push: {}", e))
                }
                _ => BumpError::Git(e),
            })
    }
}
