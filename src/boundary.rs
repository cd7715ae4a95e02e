use std::fmt;

/// Non-fatal conditions around a bump that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Uncommitted changes that stage-all will fold into the bump commit
    DirtyWorkingTree { paths: Vec<String> },
    /// The bump commit exists locally but did not reach the remote
    LocalCommitNotPushed {
        commit: String,
        remote: String,
        branch: String,
    },
    /// The operator asked not to push
    PushSkipped { remote: String, branch: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::DirtyWorkingTree { paths } => {
                write!(
                    f,
                    "{} uncommitted change(s) will be included in the bump commit: ",
                    paths.len()
                )?;
                let shown: Vec<&str> = paths.iter().take(5).map(String::as_str).collect();
                write!(f, "{}", shown.join(", "))?;
                if paths.len() > 5 {
                    write!(f, ", ... and {} more", paths.len() - 5)?;
                }
                Ok(())
            }
            BoundaryWarning::LocalCommitNotPushed {
                commit,
                remote,
                branch,
            } => {
                let short_hash = commit.get(..7).unwrap_or(commit);
                write!(
                    f,
                    "Commit {} was created locally but not pushed to {}/{}",
                    short_hash, remote, branch
                )
            }
            BoundaryWarning::PushSkipped { remote, branch } => {
                write!(f, "Push to {}/{} skipped", remote, branch)
            }
        }
    }
}
