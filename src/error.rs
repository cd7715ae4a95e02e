use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for patch-bump operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Manifest error in {path}: {reason}", path = .path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("Git command failed: {0}")]
    Command(String),

    #[error("Push of commit {commit} to {remote}/{branch} failed: {reason}")]
    Push {
        commit: String,
        remote: String,
        branch: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in patch-bump
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BumpError::Version(msg.into())
    }

    /// Create a manifest error for the given file
    pub fn manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        BumpError::Manifest {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a git command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        BumpError::Command(msg.into())
    }
}
